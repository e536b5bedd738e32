use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use true_path::config::{self, ProbeConfig, API_KEY_ENV, API_KEY_FILE_ENV};
use true_path::{logging, run_suite, CheckContext, UreqTransport};

/// A tool for checking a website address' genuineness and safety.
///
/// It checks the use of HTTPS and certificate correctness, whether the site is
/// reachable and popular, and whether Google marks it as unsafe.
#[derive(Debug, Parser)]
#[command(name = "true-path", version)]
struct Cli {
    /// Full address including protocol, like https://www.example.com/eg?q=whatever
    address: String,

    /// Explain every check instead of printing a one-line summary.
    #[arg(short, long)]
    verbose: bool,

    /// Google Safe Browsing API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// File holding the Google Safe Browsing API key.
    #[arg(long, value_name = "PATH", env = API_KEY_FILE_ENV)]
    api_key_file: Option<PathBuf>,

    /// Give up on any single request after this many seconds (no limit by default).
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging();

    let api_key = cli.api_key.or_else(|| {
        let path = cli.api_key_file.as_ref()?;
        match config::read_api_key_file(path) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read API key file");
                None
            }
        }
    });

    let probe_config = ProbeConfig::from_env()
        .with_api_key(api_key)
        .with_timeout(cli.timeout.map(Duration::from_secs));
    tracing::debug!(search_url = %probe_config.search_url, "configuration loaded");

    let transport = UreqTransport::new(probe_config.timeout);
    let ctx = CheckContext::new(&cli.address, cli.verbose, &transport, &probe_config);

    let mut stdout = std::io::stdout();
    let report = run_suite(&ctx, &mut stdout);
    stdout.flush().ok();

    process::exit(report.exit_code());
}
