//! Creator Search
//!
//! Case-insensitive substring filter over the catalog, and the mapping from
//! a query to what the suggestion list should show.

use crate::catalog::{Catalog, Creator};

/// Label of the placeholder entry shown when nothing matches
pub const NO_RESULTS_LABEL: &str = "No creators found";

/// What the suggestion list should display for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions<'a> {
    /// Empty query: the list is hidden entirely
    Hidden,
    /// Non-empty query without matches: a single non-selectable placeholder
    NoResults,
    /// Matching creators, in catalog order
    Matches(Vec<&'a Creator>),
}

impl Suggestions<'_> {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Suggestions::Hidden)
    }
}

/// Lazily filter creators whose name, specialty or description contains `query`
///
/// Matching ignores case and surrounding whitespace. An empty query matches
/// every creator; callers that must hide suggestions use [`suggest`].
pub fn filter<'a>(catalog: &'a Catalog, query: &str) -> impl Iterator<Item = &'a Creator> + 'a {
    let needle = query.trim().to_lowercase();
    catalog.iter().filter(move |creator| creator.matches(&needle))
}

/// Resolve a raw search-box value into suggestions
pub fn suggest<'a>(catalog: &'a Catalog, query: &str) -> Suggestions<'a> {
    if query.trim().is_empty() {
        return Suggestions::Hidden;
    }

    let matches: Vec<&Creator> = filter(catalog, query).collect();
    tracing::debug!(query = %query.trim(), matches = matches.len(), "Creator search");

    if matches.is_empty() {
        Suggestions::NoResults
    } else {
        Suggestions::Matches(matches)
    }
}
