//! Data structures and traits for the remote show catalog.
//!
//! This module provides structures to represent TV shows and their episodes
//! as well as the trait implemented by catalog providers.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::{DEFAULT_BASE_URL, TvMazeProvider};

use std::fmt;
use thiserror::Error;

/// Errors that can occur while fetching from the catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The catalog answered with a non-success status code
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// Failed to parse the catalog's JSON response
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

/// Identifier of a show in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an episode, unique within its show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpisodeId(pub u64);

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A TV show as listed by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    /// Catalog identifier
    pub id: ShowId,
    /// The show title, empty when the catalog sent none
    pub name: String,
    /// Summary in HTML markup
    pub summary: Option<String>,
    /// Medium resolution poster URL
    pub image: Option<String>,
    /// Average rating
    pub rating: Option<f64>,
    /// Genres in catalog order
    pub genres: Vec<String>,
    /// Running status (e.g. "Ended")
    pub status: Option<String>,
    /// Runtime of an episode in minutes
    pub runtime: Option<u32>,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Catalog identifier
    pub id: EpisodeId,
    /// The episode title
    pub name: String,
    /// The season number this episode belongs to
    pub season: u32,
    /// The episode number within the season
    pub number: u32,
    /// Summary in HTML markup
    pub summary: Option<String>,
    /// Medium resolution still URL
    pub image: Option<String>,
}

/// Trait for catalog providers that can list shows and episodes.
///
/// Implementors are shared with the fetch threads of the runtime, so they must
/// be usable from more than one thread.
pub trait CatalogProvider: Send + Sync {
    /// Lists every show in the catalog.
    ///
    /// # Returns
    ///
    /// The shows in catalog order, or a FetchError if the request failed or
    /// the response could not be parsed
    fn list_shows(&self) -> Result<Vec<Show>, FetchError>;

    /// Lists the episodes of a single show.
    ///
    /// # Arguments
    ///
    /// * `show_id` - The show whose episodes should be fetched
    fn list_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError>;
}
