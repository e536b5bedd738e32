pub mod checks;
pub mod config;
pub mod logging;
pub mod reporter;
pub mod suite;
pub mod transport;

pub use checks::{CheckContext, CheckError, CheckResult, Outcome};
pub use config::ProbeConfig;
pub use suite::{run_checks, run_suite, SuiteReport};
pub use transport::{FetchError, HttpResponse, Transport, UreqTransport};
