//! TVMaze API response types for deserialization.
//!
//! These structures mirror the JSON response format from the TVMaze API.
//! Nearly every field may be null, so everything is optional here and the
//! provider decides on fallbacks.

use serde::Deserialize;

/// A show record from the `/shows` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: Option<u64>,
    pub name: Option<String>,
    /// Show summary in HTML format
    pub summary: Option<String>,
    pub image: Option<TvMazeImage>,
    pub rating: Option<TvMazeRating>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
}

/// An episode record from the `/shows/{id}/episodes` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    pub id: Option<u64>,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    /// Season number (0 for specials)
    pub season: Option<u32>,
    /// Episode number within the season (null for specials)
    pub number: Option<u32>,
    /// Episode summary in HTML format (may be null)
    pub summary: Option<String>,
    pub image: Option<TvMazeImage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    pub medium: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TvMazeRating {
    pub average: Option<f64>,
}
