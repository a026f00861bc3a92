//! Card rendering
//!
//! Shows and episodes are first turned into plain card records with every
//! fallback already applied. A [`CardRenderer`] then turns a card into a
//! platform node. The terminal uses [`TextRenderer`], which produces text
//! blocks.

use crate::catalog::{Episode, EpisodeId, Show, ShowId};
use crate::navigation::Action;

/// Shown when a show or episode has no usable summary
pub const NO_SUMMARY: &str = "No summary available";

/// Poster used for shows without an image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/210x295?text=No+Image";

/// Separator used between genres on a show card
pub const GENRE_SEPARATOR: &str = ", ";

/// Strips markup from a summary and returns its text content
///
/// Returns [`NO_SUMMARY`] for absent or empty input, and for markup that
/// contains no text at all.
pub fn sanitize_summary(markup: Option<&str>) -> String {
    let markup = match markup {
        Some(markup) if !markup.trim().is_empty() => markup,
        _ => return NO_SUMMARY.to_string(),
    };

    let text = nanohtml2text::html2text(markup);
    let text = text.trim();

    if text.is_empty() {
        NO_SUMMARY.to_string()
    } else {
        text.to_string()
    }
}

/// Formats a season and episode number as `S01E02`
pub fn episode_code(season: u32, number: u32) -> String {
    format!("S{:02}E{:02}", season, number)
}

/// Display-ready data for a show
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    pub id: ShowId,
    pub name: String,
    pub summary: String,
    pub image: String,
    pub rating: String,
    pub genres: String,
    pub status: String,
    pub runtime: String,
    /// Dispatched when the card is clicked
    pub on_select: Action,
}

impl ShowCard {
    /// Builds a card from a show, applying every fallback value
    pub fn from_show(show: &Show) -> Self {
        Self {
            id: show.id,
            name: show.name.clone(),
            summary: sanitize_summary(show.summary.as_deref()),
            image: show
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            rating: show
                .rating
                .map(|rating| rating.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            genres: if show.genres.is_empty() {
                "no genres".to_string()
            } else {
                show.genres.join(GENRE_SEPARATOR)
            },
            status: show.status.clone().unwrap_or_else(|| "Unknown".to_string()),
            runtime: show
                .runtime
                .map(|minutes| format!("{} mins", minutes))
                .unwrap_or_else(|| "N/A".to_string()),
            on_select: Action::ShowSelected(show.id),
        }
    }
}

/// Display-ready data for an episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeCard {
    pub id: EpisodeId,
    /// `"<name> - S01E02"`
    pub title: String,
    pub summary: String,
    /// Empty when the episode has no image
    pub image: String,
}

impl EpisodeCard {
    /// Builds a card from an episode
    pub fn from_episode(episode: &Episode) -> Self {
        Self {
            id: episode.id,
            title: format!(
                "{} - {}",
                episode.name,
                episode_code(episode.season, episode.number)
            ),
            summary: sanitize_summary(episode.summary.as_deref()),
            image: episode.image.clone().unwrap_or_default(),
        }
    }
}

/// Turns cards into platform view nodes
pub trait CardRenderer {
    /// The node type produced for the rendering surface
    type Node;

    fn render_show(&self, card: &ShowCard) -> Self::Node;

    fn render_episode(&self, card: &EpisodeCard) -> Self::Node;
}

/// Renders cards as indented text blocks for the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl CardRenderer for TextRenderer {
    type Node = String;

    fn render_show(&self, card: &ShowCard) -> String {
        let mut node = String::new();
        node.push_str(&card.name);
        node.push('\n');
        node.push_str(&format!(
            "    Rating: {} | Genres: {} | Status: {} | Runtime: {}\n",
            card.rating, card.genres, card.status, card.runtime
        ));
        node.push_str(&format!("    Image: {}\n", card.image));
        node.push_str(&indent(&card.summary));
        node
    }

    fn render_episode(&self, card: &EpisodeCard) -> String {
        let mut node = String::new();
        node.push_str(&card.title);
        node.push('\n');
        if !card.image.is_empty() {
            node.push_str(&format!("    Image: {}\n", card.image));
        }
        node.push_str(&indent(&card.summary));
        node
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}\n", line))
        .collect()
}
