use std::io::Write;

use scraper::{Html, Selector};
use url::Url;

use crate::checks::{CheckContext, CheckError};
use crate::reporter;
use crate::transport::FetchError;

pub const NAME: &str = "Popularity";

/// How many organic search results are compared against the address.
pub const RESULTS_CONSIDERED: usize = 5;

const INVALID_ADDRESS: &str =
    "Invalid address – it was supposed to be in form protocol://www.domain.tld/something";

const EXPLANATION: &[&str] = &[
    "Checks whether the page is popular enough in the search engine's view. \
     It's unlikely to be your bank's login page if you are the first person ever to visit it.",
    "A false negative is possible if one page is available from different URLs.",
];

pub fn check(ctx: &CheckContext, out: &mut dyn Write) -> Result<bool, CheckError> {
    if !has_scheme_and_host(ctx.address) {
        reporter::print_error(out, INVALID_ADDRESS);
        return Ok(false);
    }

    let page = match ctx.transport.get(ctx.address, &[]) {
        Ok(page) => page,
        Err(FetchError::InvalidAddress { .. }) => {
            reporter::print_error(out, INVALID_ADDRESS);
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    let title = page_title(&page.body).ok_or_else(|| CheckError::MissingTitle {
        address: ctx.address.to_string(),
    })?;
    tracing::debug!(%title, "searching for page title");

    let results = ctx
        .transport
        .get(&ctx.config.search_url, &[("q", title.as_str())])?;
    let links = organic_links(&results.body, RESULTS_CONSIDERED);
    let prefix = match_prefix(ctx.address);
    tracing::debug!(%prefix, ?links, "comparing top search results");

    let passed = links.iter().any(|link| link.starts_with(&prefix));

    if ctx.verbose {
        reporter::print_check_report(out, NAME, passed, EXPLANATION);
    }

    Ok(passed)
}

pub fn has_scheme_and_host(address: &str) -> bool {
    Url::parse(address).map(|url| url.has_host()).unwrap_or(false)
}

/// Lower-cased text of the first `<title>` element. A blank title counts as missing.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_lowercase())
        .filter(|title| !title.is_empty())
}

/// `href` of the first anchor in each of the first `limit` organic results
/// (`li.b_algo`). Results without an anchor are skipped but still count toward `limit`.
pub fn organic_links(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let (Ok(item), Ok(anchor)) = (Selector::parse("li.b_algo"), Selector::parse("a")) else {
        return Vec::new();
    };

    document
        .select(&item)
        .take(limit)
        .filter_map(|result| result.select(&anchor).next())
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// The address up to, not including, the first `/` after `scheme://`. Without such
/// a slash the whole address plus a trailing `/` is used, so `https://example.com`
/// cannot match `https://example.com.evil.net`.
pub fn match_prefix(address: &str) -> String {
    let host_start = address.find("://").map(|i| i + 3).unwrap_or(0);
    match address[host_start..].find('/') {
        Some(offset) => address[..host_start + offset].to_string(),
        None => format!("{address}/"),
    }
}
