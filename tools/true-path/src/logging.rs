//! Diagnostic logging to stderr. The check report itself is written to stdout and
//! does not go through tracing.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TRUE_PATH_LOG";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
