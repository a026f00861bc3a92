//! Logging setup
//!
//! Logs go to stderr so they never interleave with the screen drawn on
//! stdout. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// # Arguments
///
/// * `level` - Filter directive used when `RUST_LOG` is not set, e.g. `"warn"`
///   or `"show_browser=debug"`
///
/// Calling this more than once is harmless; only the first call installs a
/// subscriber.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
