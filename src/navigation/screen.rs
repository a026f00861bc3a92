//! Screen view model computed from the view state.
//!
//! A [`Screen`] holds everything a surface needs to draw one frame: the
//! dropdown contents, the rendered cards and an optional status message. It
//! contains no logic of its own and is rebuilt from scratch on every render.

use super::state::{View, ViewState};
use super::Action;
use crate::catalog::{Episode, EpisodeId, ShowId};
use crate::filter::filter;
use crate::render::{CardRenderer, EpisodeCard, ShowCard, episode_code};

/// One entry of a selection dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    /// Identifier sent back when the entry is chosen.
    pub value: u64,
    pub label: String,
}

/// A rendered card together with its click handler.
#[derive(Debug, Clone, PartialEq)]
pub struct CardEntry<N> {
    pub node: N,
    /// Action dispatched when the card is clicked, if it is clickable.
    pub on_select: Option<Action>,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen<N> {
    pub view: View,

    /// Heading naming what is listed.
    pub title: String,

    /// Content of the search input field.
    pub search_input: String,

    /// Show dropdown entries, in catalog order.
    pub show_options: Vec<DropdownOption>,
    pub selected_show: Option<ShowId>,

    /// Episode dropdown entries, empty outside the episode views.
    pub episode_options: Vec<DropdownOption>,
    pub selected_episode: Option<EpisodeId>,

    pub cards: Vec<CardEntry<N>>,

    /// Number of items in the unfiltered collection.
    pub total: usize,

    /// Loading or error text shown in place of the cards.
    pub message: Option<String>,
}

/// Builds the screen for the given state.
pub(super) fn build<R: CardRenderer>(state: &ViewState, renderer: &R) -> Screen<R::Node> {
    let view = state.view();

    let show_options = state
        .shows
        .iter()
        .map(|show| DropdownOption {
            value: show.id.0,
            label: show.name.clone(),
        })
        .collect();

    let mut screen = Screen {
        view,
        title: String::new(),
        search_input: state.search_input.clone(),
        show_options,
        selected_show: state.selected_show,
        episode_options: Vec::new(),
        selected_episode: state.selected_episode,
        cards: Vec::new(),
        total: 0,
        message: None,
    };

    match view {
        View::ShowsBrowsing => {
            screen.title = "All shows".to_string();
            screen.total = state.shows.len();

            if state.shows_loading {
                screen.message = Some("Loading shows...".to_string());
            } else if let Some(error) = &state.shows_error {
                screen.message = Some(format!("Error loading shows: {}", error));
            } else {
                screen.cards = filter(&state.shows, &state.search_term)
                    .into_iter()
                    .map(|show| {
                        let card = ShowCard::from_show(show);
                        CardEntry {
                            node: renderer.render_show(&card),
                            on_select: Some(card.on_select),
                        }
                    })
                    .collect();
            }
        }
        View::EpisodesLoading | View::EpisodesBrowsing | View::EpisodesError => {
            screen.title = match state.selected_show() {
                Some(show) => format!("Episodes of {}", show.name),
                None => format!("Episodes of show {}", state.selected_show.map_or(0, |id| id.0)),
            };

            if view == View::EpisodesLoading {
                screen.message = Some("Loading episodes...".to_string());
                return screen;
            }

            if let Some(error) = &state.episodes_error {
                screen.message = Some(format!("Error loading episodes: {}", error));
                return screen;
            }

            screen.total = state.episodes.len();
            screen.episode_options = state
                .episodes
                .iter()
                .map(|episode| DropdownOption {
                    value: episode.id.0,
                    label: format!(
                        "{} - {}",
                        episode_code(episode.season, episode.number),
                        episode.name
                    ),
                })
                .collect();

            let visible: Vec<&Episode> = match state.selected_episode {
                // Drill-down bypasses the search filter
                Some(id) => state
                    .episodes
                    .iter()
                    .filter(|episode| episode.id == id)
                    .collect(),
                None => filter(&state.episodes, &state.search_term),
            };

            screen.cards = visible
                .into_iter()
                .map(|episode| CardEntry {
                    node: renderer.render_episode(&EpisodeCard::from_episode(episode)),
                    on_select: None,
                })
                .collect();
        }
    }

    screen
}
