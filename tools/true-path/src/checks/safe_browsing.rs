use std::collections::BTreeSet;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::checks::{CheckContext, CheckError};
use crate::config::{ProbeConfig, API_KEY_ENV, API_KEY_FILE_ENV};
use crate::reporter;

pub const NAME: &str = "Google Safe Browsing";

const THREAT_LISTS: &str = "threatLists";
const FIND_MATCHES: &str = "threatMatches:find";

const EXPLANATION: &[&str] = &[
    "Checks that the page is not on one of Google's unsafe page lists, via the Safe Browsing API.",
    "It passes if and only if the page is NOT on a blocklist. \
     If the check cannot be completed, it counts as a failure.",
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatListsResponse {
    #[serde(default)]
    pub threat_lists: Vec<ThreatListDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatListDescriptor {
    pub threat_type: String,
    pub platform_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindThreatMatchesRequest {
    pub client: ClientInfo,
    pub threat_info: ThreatInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub client_version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatInfo {
    pub threat_types: Vec<String>,
    pub platform_types: Vec<String>,
    pub threat_entry_types: Vec<String>,
    pub threat_entries: Vec<ThreatEntry>,
}

#[derive(Debug, Serialize)]
pub struct ThreatEntry {
    pub url: String,
}

/// Fails closed: a missing key or a non-200 answer reports the page as unsafe.
pub fn check(ctx: &CheckContext, out: &mut dyn Write) -> Result<bool, CheckError> {
    let Some(api_key) = ctx.config.api_key.as_deref() else {
        reporter::print_error(
            out,
            &format!(
                "A valid Google Safe Browsing API key is required. \
                 Pass --api-key, or set {API_KEY_ENV} or {API_KEY_FILE_ENV}."
            ),
        );
        return Ok(false);
    };
    let key_param = [("key", api_key)];

    let lists_endpoint = ctx.config.safe_browsing_endpoint(THREAT_LISTS);
    let lists = ctx.transport.get(&lists_endpoint, &key_param)?;
    if !lists.is_ok() {
        print_bad_status(out, lists.status);
        return Ok(false);
    }
    let lists: ThreatListsResponse =
        serde_json::from_str(&lists.body).map_err(|err| CheckError::MalformedResponse {
            endpoint: lists_endpoint.clone(),
            detail: err.to_string(),
        })?;
    tracing::debug!(count = lists.threat_lists.len(), "threat lists available");

    let request = build_request(ctx.config, &lists.threat_lists, ctx.address);
    let body = serde_json::to_value(&request).map_err(|err| CheckError::MalformedResponse {
        endpoint: lists_endpoint,
        detail: err.to_string(),
    })?;

    let matches_endpoint = ctx.config.safe_browsing_endpoint(FIND_MATCHES);
    let response = ctx.transport.post_json(&matches_endpoint, &key_param, &body)?;
    if !response.is_ok() {
        print_bad_status(out, response.status);
        return Ok(false);
    }

    let passed = !has_matches(&response.body).map_err(|detail| CheckError::MalformedResponse {
        endpoint: matches_endpoint,
        detail,
    })?;

    if ctx.verbose {
        reporter::print_check_report(out, NAME, passed, EXPLANATION);
    }

    Ok(passed)
}

/// Match query covering every advertised threat type on every advertised platform.
pub fn build_request(
    config: &ProbeConfig,
    lists: &[ThreatListDescriptor],
    address: &str,
) -> FindThreatMatchesRequest {
    let threat_types: BTreeSet<&str> = lists.iter().map(|l| l.threat_type.as_str()).collect();
    let platform_types: BTreeSet<&str> = lists.iter().map(|l| l.platform_type.as_str()).collect();

    FindThreatMatchesRequest {
        client: ClientInfo {
            client_id: config.client_id.clone(),
            client_version: config.client_version.clone(),
        },
        threat_info: ThreatInfo {
            threat_types: threat_types.into_iter().map(str::to_string).collect(),
            platform_types: platform_types.into_iter().map(str::to_string).collect(),
            threat_entry_types: vec!["URL".to_string()],
            threat_entries: vec![ThreatEntry {
                url: address.to_string(),
            }],
        },
    }
}

/// An empty JSON object or array means no list matched. A blank body or `null`
/// is not an answer and is reported as an error.
pub fn has_matches(body: &str) -> Result<bool, String> {
    if body.trim().is_empty() {
        return Err("empty response body".to_string());
    }
    let value: serde_json::Value = serde_json::from_str(body).map_err(|err| err.to_string())?;
    Ok(match value {
        serde_json::Value::Object(map) => !map.is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Null => return Err("null response body".to_string()),
        _ => true,
    })
}

fn print_bad_status(out: &mut dyn Write, status: u16) {
    reporter::print_error(out, &format!("invalid response's status code: {status}"));
}
