//! View state owned by the navigator.
//!
//! [`ViewState`] is the single source of truth for everything the screen
//! shows. It is mutated only by [`super::Navigator::dispatch`]; the current
//! [`View`] is derived from it rather than stored.

use crate::catalog::{Episode, EpisodeId, Show, ShowId};

/// Identifies one episode fetch.
///
/// Tokens grow monotonically. Only the result carrying the latest token may
/// update the state; anything older is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RequestToken(pub u64);

impl RequestToken {
    /// Returns the token that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// The screen the user is currently looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The show list, filtered by the search term.
    ShowsBrowsing,
    /// A show was selected and its episodes are being fetched.
    EpisodesLoading,
    /// The episodes of the selected show.
    EpisodesBrowsing,
    /// The episode fetch for the selected show failed.
    EpisodesError,
}

/// All mutable state of the browser.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Valid shows sorted by name.
    pub shows: Vec<Show>,

    /// True while the catalog fetch issued at startup is pending.
    pub shows_loading: bool,

    /// Message of a failed catalog fetch.
    pub shows_error: Option<String>,

    /// The show whose episodes are displayed or being fetched.
    pub selected_show: Option<ShowId>,

    /// Episodes of the selected show, empty unless `selected_show` is set.
    pub episodes: Vec<Episode>,

    pub episodes_loading: bool,

    pub episodes_error: Option<String>,

    /// Episode picked from the episode dropdown (single card display).
    pub selected_episode: Option<EpisodeId>,

    /// Search input exactly as typed.
    pub search_input: String,

    /// Lowercased search input used for filtering.
    pub search_term: String,

    /// Token of the most recently requested episode fetch.
    pub latest_request: RequestToken,
}

impl ViewState {
    /// Derives the current view from the state flags.
    pub fn view(&self) -> View {
        if self.selected_show.is_none() {
            View::ShowsBrowsing
        } else if self.episodes_loading {
            View::EpisodesLoading
        } else if self.episodes_error.is_some() {
            View::EpisodesError
        } else {
            View::EpisodesBrowsing
        }
    }

    /// Returns the selected show, if it is part of the catalog.
    pub fn selected_show(&self) -> Option<&Show> {
        let id = self.selected_show?;
        self.shows.iter().find(|show| show.id == id)
    }

    /// Clears the search term and the input field.
    pub(super) fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_term.clear();
    }

    /// Forgets the selected show and everything loaded for it.
    pub(super) fn clear_episodes(&mut self) {
        self.selected_show = None;
        self.episodes.clear();
        self.episodes_loading = false;
        self.episodes_error = None;
        self.selected_episode = None;
    }
}
