use std::io::Write;

use crate::checks::{CheckContext, CheckError};
use crate::reporter;
use crate::transport::FetchError;

pub const NAME: &str = "Certificate";

const EXPLANATION: &[&str] = &[
    "Checks whether the website declares HTTPS and indeed presents a valid TLS certificate.",
    "The verdict relies on the TLS library's certificate validation; if this check passed \
     or failed when it clearly should not have, update the tool.",
];

/// Only a TLS-layer failure counts as a bad certificate. Other network faults are
/// returned as errors, and the HTTP status is not inspected.
pub fn check(ctx: &CheckContext, out: &mut dyn Write) -> Result<bool, CheckError> {
    let passed = if !ctx.address.starts_with("https://") {
        false
    } else {
        match ctx.transport.get(ctx.address, &[]) {
            Ok(response) => {
                tracing::debug!(status = response.status, "certificate accepted");
                true
            }
            Err(FetchError::Tls { detail, .. }) => {
                tracing::debug!(%detail, "certificate rejected");
                false
            }
            Err(err) => return Err(err.into()),
        }
    };

    if ctx.verbose {
        reporter::print_check_report(out, NAME, passed, EXPLANATION);
    }

    Ok(passed)
}
