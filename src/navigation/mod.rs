//! Navigation between the show list and the episodes of a show.
//!
//! Every user input and every completed fetch reaches the navigator as an
//! [`Action`]. [`Navigator::dispatch`] is the one reducer: it mutates the
//! [`ViewState`] and returns the [`Effect`]s the runtime has to carry out.
//!
//! # Flow
//!
//! ```text
//! ShowsBrowsing ──ShowSelected──▶ EpisodesLoading ──EpisodesLoaded(Ok)──▶ EpisodesBrowsing
//!       ▲                               │
//!       │                               └──EpisodesLoaded(Err)──▶ EpisodesError
//!       └──────────── BackRequested / ShowCleared ◀──────────────────────┘
//! ```
//!
//! Episode fetches are tagged with a [`RequestToken`]. Selecting another show
//! or going back invalidates the pending fetch; its result is dropped when it
//! arrives.

mod screen;
mod state;

pub use screen::{CardEntry, DropdownOption, Screen};
pub use state::{RequestToken, View, ViewState};

use crate::catalog::{Episode, EpisodeId, FetchError, Show, ShowId};
use crate::render::CardRenderer;
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Inputs to the navigator.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The catalog fetch issued at startup finished.
    ShowsLoaded(Result<Vec<Show>, FetchError>),

    /// The search input changed to the given text.
    SearchChanged(String),

    /// A show card was clicked or the show dropdown got a value.
    ShowSelected(ShowId),

    /// The show dropdown was cleared.
    ShowCleared,

    /// The "back to shows" control was used.
    BackRequested,

    /// The episode dropdown got a value, or was cleared with None.
    EpisodeSelected(Option<EpisodeId>),

    /// An episode fetch finished.
    EpisodesLoaded {
        /// Token handed out with the matching [`Effect::FetchEpisodes`].
        token: RequestToken,
        result: Result<Vec<Episode>, FetchError>,
    },
}

/// Side effects requested by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the show catalog and report back with [`Action::ShowsLoaded`].
    FetchShows,

    /// Fetch the episodes of a show and report back with
    /// [`Action::EpisodesLoaded`] carrying the same token.
    FetchEpisodes {
        show_id: ShowId,
        token: RequestToken,
    },

    /// Redraw the screen from the current state.
    Render,
}

/// Owns the view state and applies actions to it.
#[derive(Debug, Default)]
pub struct Navigator {
    state: ViewState,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The view derived from the current state.
    pub fn view(&self) -> View {
        self.state.view()
    }

    /// Starts the application: marks the catalog as loading and requests it.
    pub fn start(&mut self) -> Vec<Effect> {
        self.state.shows_loading = true;
        self.state.shows_error = None;
        vec![Effect::FetchShows, Effect::Render]
    }

    /// Applies an action and returns the effects to execute.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut navigator = Navigator::new();
    /// let effects = navigator.dispatch(Action::ShowSelected(ShowId(82)));
    /// assert_eq!(navigator.view(), View::EpisodesLoading);
    /// ```
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::ShowsLoaded(result) => self.shows_loaded(result),
            Action::SearchChanged(input) => {
                self.state.search_term = input.to_lowercase();
                self.state.search_input = input;
                // Any search change leaves the single episode display
                self.state.selected_episode = None;
                vec![Effect::Render]
            }
            Action::ShowSelected(show_id) => self.select_show(show_id),
            Action::ShowCleared | Action::BackRequested => self.back_to_shows(),
            Action::EpisodeSelected(episode_id) => self.select_episode(episode_id),
            Action::EpisodesLoaded { token, result } => self.episodes_loaded(token, result),
        }
    }

    /// Builds the screen for the current state.
    pub fn screen<R: CardRenderer>(&self, renderer: &R) -> Screen<R::Node> {
        screen::build(&self.state, renderer)
    }

    fn shows_loaded(&mut self, result: Result<Vec<Show>, FetchError>) -> Vec<Effect> {
        self.state.shows_loading = false;

        match result {
            Ok(shows) => {
                self.state.shows = prepare_catalog(shows);
                self.state.shows_error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load shows");
                self.state.shows.clear();
                self.state.shows_error = Some(e.to_string());
            }
        }

        vec![Effect::Render]
    }

    fn select_show(&mut self, show_id: ShowId) -> Vec<Effect> {
        self.state.clear_search();
        self.state.clear_episodes();
        self.state.selected_show = Some(show_id);
        self.state.episodes_loading = true;

        let token = self.state.latest_request.next();
        self.state.latest_request = token;
        debug!(%show_id, token = token.0, "requesting episodes");

        vec![Effect::FetchEpisodes { show_id, token }, Effect::Render]
    }

    fn back_to_shows(&mut self) -> Vec<Effect> {
        if self.state.selected_show.is_none() {
            return Vec::new();
        }

        self.state.clear_search();
        self.state.clear_episodes();
        // A fetch still in flight belongs to the show we just left
        self.state.latest_request = self.state.latest_request.next();

        vec![Effect::Render]
    }

    fn select_episode(&mut self, episode_id: Option<EpisodeId>) -> Vec<Effect> {
        if self.state.view() != View::EpisodesBrowsing {
            debug!(?episode_id, "ignoring episode selection outside the episode list");
            return Vec::new();
        }

        if let Some(id) = episode_id {
            if !self.state.episodes.iter().any(|episode| episode.id == id) {
                warn!(episode_id = %id, "selected episode is not part of the loaded show");
                return Vec::new();
            }
        }

        self.state.selected_episode = episode_id;
        vec![Effect::Render]
    }

    fn episodes_loaded(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Episode>, FetchError>,
    ) -> Vec<Effect> {
        if token != self.state.latest_request {
            debug!(
                token = token.0,
                latest = self.state.latest_request.0,
                "discarding stale episode response"
            );
            return Vec::new();
        }

        self.state.episodes_loading = false;

        match result {
            Ok(episodes) => {
                debug!(count = episodes.len(), "episodes loaded");
                self.state.episodes = episodes;
                self.state.episodes_error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load episodes");
                self.state.episodes.clear();
                self.state.episodes_error = Some(e.to_string());
            }
        }

        vec![Effect::Render]
    }
}

/// Drops shows without a name and sorts the rest by name.
///
/// Names are compared without accents or case first, so "Éclair" sorts with
/// the other E's. Names that only differ in accents or case keep a stable
/// order through the lowercased and then the raw name.
pub fn prepare_catalog(shows: Vec<Show>) -> Vec<Show> {
    let total = shows.len();

    let mut valid: Vec<Show> = shows
        .into_iter()
        .filter(|show| !show.name.is_empty())
        .collect();

    info!(
        total,
        discarded = total - valid.len(),
        "loaded show catalog"
    );

    valid.sort_by_cached_key(|show| {
        (
            collation_key(&show.name),
            show.name.to_lowercase(),
            show.name.clone(),
        )
    });
    valid
}

/// Primary sort key: lowercase with combining marks removed after NFD.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextRenderer;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id: ShowId(id),
            name: name.to_string(),
            summary: None,
            image: None,
            rating: None,
            genres: Vec::new(),
            status: None,
            runtime: None,
        }
    }

    fn episode(id: u64, name: &str, season: u32, number: u32) -> Episode {
        Episode {
            id: EpisodeId(id),
            name: name.to_string(),
            season,
            number,
            summary: Some(format!("<p>Summary of {}</p>", name)),
            image: None,
        }
    }

    fn loaded_navigator() -> Navigator {
        let mut navigator = Navigator::new();
        navigator.start();
        navigator.dispatch(Action::ShowsLoaded(Ok(vec![
            show(82, "Game of Thrones"),
            show(7, "Homeland"),
            show(1, "Under the Dome"),
        ])));
        navigator
    }

    fn token_of(effects: &[Effect]) -> RequestToken {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::FetchEpisodes { token, .. } => Some(*token),
                _ => None,
            })
            .expect("no episode fetch requested")
    }

    fn browsing_episodes() -> Navigator {
        let mut navigator = loaded_navigator();
        let token = token_of(&navigator.dispatch(Action::ShowSelected(ShowId(82))));
        navigator.dispatch(Action::EpisodesLoaded {
            token,
            result: Ok(vec![
                episode(1, "Winter Is Coming", 1, 1),
                episode(2, "The Kingsroad", 1, 2),
                episode(3, "Lord Snow", 1, 3),
            ]),
        });
        navigator
    }

    #[test]
    fn test_start_requests_catalog() {
        let mut navigator = Navigator::new();
        let effects = navigator.start();

        assert_eq!(effects, vec![Effect::FetchShows, Effect::Render]);
        assert!(navigator.state().shows_loading);
    }

    #[test]
    fn test_invalid_shows_are_discarded() {
        let mut navigator = Navigator::new();
        navigator.start();
        navigator.dispatch(Action::ShowsLoaded(Ok(vec![show(1, "Lost"), show(2, "")])));

        assert_eq!(navigator.state().shows.len(), 1);
        assert_eq!(navigator.state().shows[0].name, "Lost");
        assert_eq!(navigator.screen(&TextRenderer).cards.len(), 1);
    }

    #[test]
    fn test_catalog_is_sorted_by_name() {
        let sorted = prepare_catalog(vec![
            show(1, "lost"),
            show(2, "Breaking Bad"),
            show(3, "Lost"),
            show(4, "arrow"),
        ]);
        let names: Vec<&str> = sorted.iter().map(|show| show.name.as_str()).collect();

        assert_eq!(names, vec!["arrow", "Breaking Bad", "Lost", "lost"]);
    }

    #[test]
    fn test_catalog_sort_ignores_accents() {
        let sorted = prepare_catalog(vec![
            show(1, "Zorro"),
            show(2, "Über Alles"),
            show(3, "Éclair"),
            show(4, "Eclair"),
        ]);
        let names: Vec<&str> = sorted.iter().map(|show| show.name.as_str()).collect();

        assert_eq!(names, vec!["Eclair", "Éclair", "Über Alles", "Zorro"]);
    }

    #[test]
    fn test_whitespace_name_is_kept() {
        let shows = prepare_catalog(vec![show(1, " "), show(2, ""), show(3, "Lost")]);
        let ids: Vec<ShowId> = shows.iter().map(|show| show.id).collect();

        assert_eq!(ids, vec![ShowId(1), ShowId(3)]);
    }

    #[test]
    fn test_collation_key() {
        assert_eq!(collation_key("Über Alles"), "uber alles");
        assert_eq!(collation_key("Ça Va"), "ca va");
    }

    #[test]
    fn test_catalog_error_is_recorded() {
        let mut navigator = Navigator::new();
        navigator.start();
        navigator.dispatch(Action::ShowsLoaded(Err(FetchError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        })));

        let state = navigator.state();
        assert!(!state.shows_loading);
        assert_eq!(state.shows_error.as_deref(), Some("HTTP 503 Service Unavailable"));
        assert_eq!(navigator.view(), View::ShowsBrowsing);
    }

    #[test]
    fn test_search_updates_term() {
        let mut navigator = loaded_navigator();
        let effects = navigator.dispatch(Action::SearchChanged("HomeLand".to_string()));

        assert_eq!(effects, vec![Effect::Render]);
        assert_eq!(navigator.state().search_input, "HomeLand");
        assert_eq!(navigator.state().search_term, "homeland");
        assert_eq!(navigator.view(), View::ShowsBrowsing);
    }

    #[test]
    fn test_select_show_starts_fetch_and_clears_search() {
        let mut navigator = loaded_navigator();
        navigator.dispatch(Action::SearchChanged("game".to_string()));

        let effects = navigator.dispatch(Action::ShowSelected(ShowId(82)));

        assert_eq!(
            effects,
            vec![
                Effect::FetchEpisodes {
                    show_id: ShowId(82),
                    token: RequestToken(1),
                },
                Effect::Render,
            ]
        );
        let state = navigator.state();
        assert_eq!(state.selected_show, Some(ShowId(82)));
        assert!(state.search_input.is_empty());
        assert!(state.search_term.is_empty());
        assert!(state.episodes.is_empty());
        assert_eq!(navigator.view(), View::EpisodesLoading);
    }

    #[test]
    fn test_episodes_loaded() {
        let navigator = browsing_episodes();

        assert_eq!(navigator.view(), View::EpisodesBrowsing);
        assert_eq!(navigator.state().episodes.len(), 3);
        assert!(!navigator.state().episodes_loading);
    }

    #[test]
    fn test_episode_fetch_failure() {
        let mut navigator = loaded_navigator();
        let token = token_of(&navigator.dispatch(Action::ShowSelected(ShowId(7))));

        navigator.dispatch(Action::EpisodesLoaded {
            token,
            result: Err(FetchError::Request("connection refused".to_string())),
        });

        let state = navigator.state();
        assert_eq!(navigator.view(), View::EpisodesError);
        assert!(!state.episodes_loading);
        assert_eq!(
            state.episodes_error.as_deref(),
            Some("Request failed: connection refused")
        );
    }

    #[test]
    fn test_latest_selection_wins_over_late_response() {
        let mut navigator = loaded_navigator();
        let first = token_of(&navigator.dispatch(Action::ShowSelected(ShowId(7))));
        let second = token_of(&navigator.dispatch(Action::ShowSelected(ShowId(82))));

        // Show 82 answers first, show 7 answers last
        navigator.dispatch(Action::EpisodesLoaded {
            token: second,
            result: Ok(vec![episode(1, "Winter Is Coming", 1, 1)]),
        });
        let effects = navigator.dispatch(Action::EpisodesLoaded {
            token: first,
            result: Ok(vec![episode(100, "Pilot", 1, 1)]),
        });

        assert!(effects.is_empty());
        let state = navigator.state();
        assert_eq!(state.selected_show, Some(ShowId(82)));
        assert_eq!(state.episodes.len(), 1);
        assert_eq!(state.episodes[0].name, "Winter Is Coming");
    }

    #[test]
    fn test_stale_response_after_back_is_ignored() {
        let mut navigator = loaded_navigator();
        let token = token_of(&navigator.dispatch(Action::ShowSelected(ShowId(7))));
        navigator.dispatch(Action::BackRequested);

        let effects = navigator.dispatch(Action::EpisodesLoaded {
            token,
            result: Ok(vec![episode(100, "Pilot", 1, 1)]),
        });

        assert!(effects.is_empty());
        assert_eq!(navigator.view(), View::ShowsBrowsing);
        assert!(navigator.state().episodes.is_empty());
    }

    #[test]
    fn test_back_from_error_shows_unfiltered_list() {
        let mut navigator = loaded_navigator();
        let token = token_of(&navigator.dispatch(Action::ShowSelected(ShowId(7))));
        navigator.dispatch(Action::EpisodesLoaded {
            token,
            result: Err(FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            }),
        });
        navigator.dispatch(Action::SearchChanged("zz".to_string()));
        assert_eq!(navigator.view(), View::EpisodesError);

        let effects = navigator.dispatch(Action::BackRequested);

        assert_eq!(effects, vec![Effect::Render]);
        assert_eq!(navigator.view(), View::ShowsBrowsing);
        let state = navigator.state();
        assert!(state.episodes_error.is_none());
        assert!(state.search_term.is_empty());
        assert_eq!(navigator.screen(&TextRenderer).cards.len(), 3);
    }

    #[test]
    fn test_show_cleared_returns_to_shows() {
        let mut navigator = browsing_episodes();
        navigator.dispatch(Action::ShowCleared);

        assert_eq!(navigator.view(), View::ShowsBrowsing);
        assert!(navigator.state().episodes.is_empty());
        assert!(navigator.state().selected_show.is_none());
    }

    #[test]
    fn test_back_while_browsing_shows_is_noop() {
        let mut navigator = loaded_navigator();
        navigator.dispatch(Action::SearchChanged("home".to_string()));

        assert!(navigator.dispatch(Action::BackRequested).is_empty());
        assert_eq!(navigator.state().search_term, "home");
    }

    #[test]
    fn test_episode_drill_down() {
        let mut navigator = browsing_episodes();
        let effects = navigator.dispatch(Action::EpisodeSelected(Some(EpisodeId(2))));

        assert_eq!(effects, vec![Effect::Render]);
        assert_eq!(navigator.state().selected_episode, Some(EpisodeId(2)));

        navigator.dispatch(Action::EpisodeSelected(None));
        assert_eq!(navigator.state().selected_episode, None);
    }

    #[test]
    fn test_search_exits_drill_down() {
        let mut navigator = browsing_episodes();
        navigator.dispatch(Action::EpisodeSelected(Some(EpisodeId(2))));
        navigator.dispatch(Action::SearchChanged("lord".to_string()));

        assert_eq!(navigator.state().selected_episode, None);
        assert_eq!(navigator.view(), View::EpisodesBrowsing);
    }

    #[test]
    fn test_unknown_episode_selection_is_ignored() {
        let mut navigator = browsing_episodes();

        assert!(navigator.dispatch(Action::EpisodeSelected(Some(EpisodeId(999)))).is_empty());
        assert_eq!(navigator.state().selected_episode, None);
    }

    #[test]
    fn test_episode_selection_while_loading_is_ignored() {
        let mut navigator = loaded_navigator();
        navigator.dispatch(Action::ShowSelected(ShowId(82)));

        assert!(navigator.dispatch(Action::EpisodeSelected(Some(EpisodeId(1)))).is_empty());
    }
}
