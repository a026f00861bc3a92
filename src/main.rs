use clap::Parser;
use show_browser::{Config, DEFAULT_BASE_URL, browse, init_tracing};
use std::process;
use std::time::Duration;

/// Browse TV shows and their episodes from the TVMaze catalog.
///
/// Type `help` once the show list is displayed to see the available commands.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Root URL of the catalog API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log filter written to stderr, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            base_url: cli.base_url,
            timeout: cli.timeout.map(Duration::from_secs),
            log_level: cli.log_level,
        }
    }
}

fn main() {
    let config = Config::from(Cli::parse());
    init_tracing(&config.log_level);

    if let Err(e) = browse(&config) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
