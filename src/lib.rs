//! show_browser - Browse TV shows and their episodes from the terminal
//!
//! This library lists the shows of a TVMaze-compatible catalog, filters them
//! as you type, and drills down into the episodes of a selected show.

mod app;
mod catalog;
mod filter;
mod input;
mod logging;
mod navigation;
mod render;

use std::io::{self, BufReader};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

// Re-export the building blocks so other front ends can reuse them
pub use app::{App, Event, Flow, Surface, TerminalSurface};
pub use catalog::{
    CatalogProvider, DEFAULT_BASE_URL, Episode, EpisodeId, FetchError, Show, ShowId,
    TvMazeProvider,
};
pub use filter::{Searchable, filter, matches};
pub use input::{HELP_TEXT, Input, InputError, parse_input, spawn_reader};
pub use logging::init_tracing;
pub use navigation::{
    Action, CardEntry, DropdownOption, Effect, Navigator, RequestToken, Screen, View, ViewState,
    prepare_catalog,
};
pub use render::{
    CardRenderer, EpisodeCard, NO_SUMMARY, PLACEHOLDER_IMAGE, ShowCard, TextRenderer,
    episode_code, sanitize_summary,
};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the catalog API
    pub base_url: String,

    /// Per-request timeout. None waits indefinitely.
    pub timeout: Option<Duration>,

    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            log_level: "warn".to_string(),
        }
    }
}

/// Top-level error type for show_browser operations
#[derive(Debug, Error)]
pub enum ShowBrowserError {
    /// The catalog client could not be set up
    #[error("Catalog error: {0}")]
    Fetch(#[from] FetchError),

    /// Drawing to the terminal failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Runs the interactive browser on stdin and stdout until the user quits
///
/// # Examples
///
/// ```no_run
/// use show_browser::{Config, browse};
///
/// browse(&Config::default()).unwrap();
/// ```
pub fn browse(config: &Config) -> Result<(), ShowBrowserError> {
    let provider = TvMazeProvider::with_endpoint(&config.base_url, config.timeout)?;
    info!(base_url = %config.base_url, "starting show browser");

    let (events_tx, events_rx) = mpsc::channel();
    spawn_reader(BufReader::new(io::stdin()), events_tx.clone());

    let app = App::new(
        Arc::new(provider),
        TextRenderer,
        TerminalSurface::stdout(),
        events_tx,
    );
    app.run(events_rx)
}
