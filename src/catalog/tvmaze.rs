//! TVMaze catalog provider implementation.

use super::tvmaze_types::{TvMazeEpisode, TvMazeShow};
use super::{CatalogProvider, Episode, EpisodeId, FetchError, Show, ShowId};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Base URL of the public TVMaze API.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Catalog provider for the TVMaze API.
///
/// This provider lists shows from `{base}/shows` and the episodes of a show
/// from `{base}/shows/{id}/episodes`.
pub struct TvMazeProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeProvider {
    /// Creates a provider for the given base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the API, without a trailing `/shows`.
    ///   [`DEFAULT_BASE_URL`] points at the public TVMaze API.
    /// * `timeout` - Optional per-request timeout. None waits indefinitely.
    pub fn with_endpoint(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues a GET request and parses the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "requesting catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                reason: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            });
        }

        response
            .json()
            .map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Converts a TVMaze show to our Show structure.
    ///
    /// Returns None for records without an id. A missing name is kept as an
    /// empty string so the caller's validity check can count it.
    fn convert_show(tvmaze_show: TvMazeShow) -> Option<Show> {
        let id = tvmaze_show.id?;

        Some(Show {
            id: ShowId(id),
            name: tvmaze_show.name.unwrap_or_default(),
            summary: tvmaze_show.summary,
            image: tvmaze_show.image.and_then(|image| image.medium),
            rating: tvmaze_show.rating.and_then(|rating| rating.average),
            genres: tvmaze_show.genres,
            status: tvmaze_show.status,
            runtime: tvmaze_show.runtime,
        })
    }

    /// Converts a TVMaze episode to our Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Option<Episode> {
        let id = tvmaze_episode.id?;

        Some(Episode {
            id: EpisodeId(id),
            name: tvmaze_episode.name.unwrap_or_else(|| "Unknown".to_string()),
            season: tvmaze_episode.season.unwrap_or_default(),
            number: tvmaze_episode.number.unwrap_or_default(),
            summary: tvmaze_episode.summary,
            image: tvmaze_episode.image.and_then(|image| image.medium),
        })
    }
}

impl CatalogProvider for TvMazeProvider {
    fn list_shows(&self) -> Result<Vec<Show>, FetchError> {
        let records: Vec<TvMazeShow> = self.get_json("/shows")?;
        let total = records.len();

        let shows: Vec<Show> = records
            .into_iter()
            .filter_map(Self::convert_show)
            .collect();

        if shows.len() < total {
            warn!(skipped = total - shows.len(), "skipped show records without an id");
        }

        Ok(shows)
    }

    fn list_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FetchError> {
        let records: Vec<TvMazeEpisode> = self.get_json(&format!("/shows/{show_id}/episodes"))?;
        let total = records.len();

        let episodes: Vec<Episode> = records
            .into_iter()
            .filter_map(Self::convert_episode)
            .collect();

        if episodes.len() < total {
            warn!(
                %show_id,
                skipped = total - episodes.len(),
                "skipped episode records without an id"
            );
        }

        Ok(episodes)
    }
}
