pub mod certificate;
pub mod popularity;
pub mod safe_browsing;
pub mod safe_url;

use std::io::Write;

use crate::config::ProbeConfig;
use crate::transport::{FetchError, Transport};

/// Inputs shared by every check in one run.
pub struct CheckContext<'a> {
    /// Full address including protocol, e.g. `https://www.example.com/eg?q=whatever`.
    pub address: &'a str,
    pub verbose: bool,
    pub transport: &'a dyn Transport,
    pub config: &'a ProbeConfig,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        address: &'a str,
        verbose: bool,
        transport: &'a dyn Transport,
        config: &'a ProbeConfig,
    ) -> Self {
        Self {
            address,
            verbose,
            transport,
            config,
        }
    }
}

/// Faults a check does not handle itself. They leave the check as `Err` and the
/// suite records them as indeterminate.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("page at {address} has no <title> element")]
    MissingTitle { address: String },
    #[error("unexpected response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: String, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    Indeterminate(String),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn from_result(result: &Result<bool, CheckError>) -> Self {
        match result {
            Ok(true) => Outcome::Passed,
            Ok(false) => Outcome::Failed,
            Err(err) => Outcome::Indeterminate(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: Outcome,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.outcome.passed()
    }
}

pub type CheckFn = fn(&CheckContext, &mut dyn Write) -> Result<bool, CheckError>;

#[derive(Clone, Copy)]
pub struct CheckSpec {
    pub name: &'static str,
    pub run: CheckFn,
}

/// Every check, in the order the suite runs them.
pub const ALL_CHECKS: [CheckSpec; 4] = [
    CheckSpec {
        name: safe_url::NAME,
        run: safe_url::check,
    },
    CheckSpec {
        name: certificate::NAME,
        run: certificate::check,
    },
    CheckSpec {
        name: popularity::NAME,
        run: popularity::check,
    },
    CheckSpec {
        name: safe_browsing::NAME,
        run: safe_browsing::check,
    },
];
