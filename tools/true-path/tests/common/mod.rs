#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Write;

use true_path::checks::CheckFn;
use true_path::{CheckContext, CheckError, FetchError, HttpResponse, ProbeConfig, Transport};

pub const SEARCH_URL: &str = "http://search.test/search";
pub const SAFE_BROWSING_API: &str = "http://safebrowsing.test/v4/";
pub const THREAT_LISTS_URL: &str = "http://safebrowsing.test/v4/threatLists";
pub const FIND_MATCHES_URL: &str = "http://safebrowsing.test/v4/threatMatches:find";

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Serves canned responses by exact URL and records every request.
#[derive(Default)]
pub struct FakeTransport {
    routes: Vec<(String, Result<HttpResponse, FetchError>)>,
    calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            url.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        ));
        self
    }

    pub fn fail(mut self, url: &str, error: FetchError) -> Self {
        self.routes.push((url.to_string(), Err(error)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.url.clone()).collect()
    }

    fn lookup(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.routes
            .iter()
            .find(|(route, _)| route == url)
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Err(network_error(url)))
    }

    fn record(&self, method: &'static str, url: &str, query: &[(&str, &str)], body: Option<&serde_json::Value>) {
        self.calls.borrow_mut().push(Call {
            method,
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.cloned(),
        });
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        self.record("GET", url, query, None);
        self.lookup(url)
    }

    fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, FetchError> {
        self.record("POST", url, query, Some(body));
        self.lookup(url)
    }
}

pub fn tls_error(url: &str) -> FetchError {
    FetchError::Tls {
        address: url.to_string(),
        detail: "invalid peer certificate: Expired".to_string(),
    }
}

pub fn network_error(url: &str) -> FetchError {
    FetchError::Network {
        address: url.to_string(),
        detail: "connection refused".to_string(),
    }
}

pub fn test_config(api_key: Option<&str>) -> ProbeConfig {
    ProbeConfig {
        search_url: SEARCH_URL.to_string(),
        safe_browsing_api: SAFE_BROWSING_API.to_string(),
        ..ProbeConfig::default()
    }
    .with_api_key(api_key.map(str::to_string))
}

pub fn page_with_title(title: &str) -> String {
    format!("<html><head><title>{title}</title></head><body><p>hello</p></body></html>")
}

pub fn search_results(links: &[&str]) -> String {
    let mut html = String::from("<html><body><ol id=\"b_results\">");
    for link in links {
        html.push_str(&format!(
            "<li class=\"b_algo\"><h2><a href=\"{link}\">result</a></h2></li>"
        ));
    }
    html.push_str("</ol></body></html>");
    html
}

pub const THREAT_LISTS_BODY: &str = r#"{"threatLists":[
    {"threatType":"MALWARE","platformType":"ANY_PLATFORM","threatEntryType":"URL"},
    {"threatType":"SOCIAL_ENGINEERING","platformType":"WINDOWS","threatEntryType":"URL"}
]}"#;

/// Run one check and capture what it printed.
pub fn run_check(
    check: CheckFn,
    address: &str,
    verbose: bool,
    transport: &FakeTransport,
    config: &ProbeConfig,
) -> (Result<bool, CheckError>, String) {
    let ctx = CheckContext::new(address, verbose, transport, config);
    let mut out: Vec<u8> = Vec::new();
    let result = check(&ctx, &mut out as &mut dyn Write);
    (result, String::from_utf8(out).unwrap())
}
