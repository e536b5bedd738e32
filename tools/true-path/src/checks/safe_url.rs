use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::checks::{CheckContext, CheckError};
use crate::reporter;

pub const NAME: &str = "Safe URL";

// `https://`, then a plain host, then any number of `/`-led segments drawn from a
// conservative character set. Anchored on both ends.
static SAFE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[.0-9A-Za-z]+(/[#0-9A-Za-z.,\-_~!?$%&'()*+;=:@]*)*$").unwrap()
});

const EXPLANATION: &[&str] = &[
    "The address is considered safe if it begins with \"https://\" (a secured connection), \
     contains no tricky characters (no greek letters resembling latin ones, no unicode, \
     no control sequences) and only contains @ after the slash that ends the domain.",
];

/// Pure shape test, no network access.
pub fn is_safe_shape(address: &str) -> bool {
    SAFE_URL_PATTERN.is_match(address)
}

pub fn check(ctx: &CheckContext, out: &mut dyn Write) -> Result<bool, CheckError> {
    let passed = is_safe_shape(ctx.address);
    tracing::debug!(address = ctx.address, passed, "safe url shape");

    if ctx.verbose {
        reporter::print_check_report(out, NAME, passed, EXPLANATION);
    }

    Ok(passed)
}
