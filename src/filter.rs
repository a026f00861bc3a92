//! Search filtering for shows and episodes
//!
//! Filtering is a case-insensitive substring match on the name or the raw
//! summary of an item.

use crate::catalog::{Episode, Show};

/// Anything that can be matched by the search box
pub trait Searchable {
    /// The display name of the item
    fn name(&self) -> &str;

    /// The summary markup of the item, if any
    fn summary(&self) -> Option<&str>;
}

impl Searchable for Show {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

impl Searchable for Episode {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// Returns true if the item matches the search term
///
/// `term` must already be lowercased. An empty term matches everything.
pub fn matches<T: Searchable + ?Sized>(item: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    item.name().to_lowercase().contains(term)
        || item.summary().unwrap_or("").to_lowercase().contains(term)
}

/// Filters items by the search term, preserving their order
///
/// # Arguments
///
/// * `items` - The collection to filter
/// * `term` - Lowercased search term
///
/// # Examples
///
/// ```ignore
/// let visible = filter(&state.shows, "lost");
/// ```
pub fn filter<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        summary: Option<&'static str>,
    }

    impl Searchable for Item {
        fn name(&self) -> &str {
            self.name
        }

        fn summary(&self) -> Option<&str> {
            self.summary
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Lost", summary: Some("<p>Survivors of a plane crash.</p>") },
            Item { name: "Breaking Bad", summary: None },
            Item { name: "The Wire", summary: Some("<p>Baltimore drug scene.</p>") },
            Item { name: "Dark", summary: Some("<p>A missing child in a German town.</p>") },
        ]
    }

    fn names(filtered: &[&Item]) -> Vec<&'static str> {
        filtered.iter().map(|item| item.name).collect()
    }

    #[test]
    fn test_empty_term_keeps_all_in_order() {
        let items = items();
        let filtered = filter(&items, "");
        assert_eq!(names(&filtered), vec!["Lost", "Breaking Bad", "The Wire", "Dark"]);
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let items = items();
        assert_eq!(names(&filter(&items, "breaking")), vec!["Breaking Bad"]);
    }

    #[test]
    fn test_matches_summary() {
        let items = items();
        assert_eq!(names(&filter(&items, "baltimore")), vec!["The Wire"]);
    }

    #[test]
    fn test_substring_match_across_items_preserves_order() {
        let items = items();
        // "plane" and "german" both contain the term
        assert_eq!(names(&filter(&items, "an")), vec!["Lost", "Dark"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let items = items();
        assert!(filter(&items, "zz").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = items();
        let once = filter(&items, "the");
        let twice: Vec<&Item> = once
            .iter()
            .copied()
            .filter(|item| matches(*item, "the"))
            .collect();
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_case_normalized_term_gives_same_result() {
        let items = items();
        let term = "DaRk".to_uppercase().to_lowercase();
        assert_eq!(names(&filter(&items, &term)), names(&filter(&items, "dark")));
    }
}
