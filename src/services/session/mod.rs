//! Per-user browsing session: navigation plus the last search, owned by the
//! caller and passed to every handler.

pub mod navigation;

use crate::services::images::resolver::GridItem;
use crate::services::search::criteria::{SearchCriteria, SearchForm};
use crate::services::search::SearchOutcome;
use navigation::NavigationState;

/// The last explicit search and what it produced.
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub criteria: SearchCriteria,
    pub items: Vec<GridItem>,
    /// User-facing message when the data source failed
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    pub navigation: NavigationState,
    last_search: Option<SearchSnapshot>,
}

impl BrowseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot. Navigation never calls this, so going to a
    /// detail page and back shows the same grid without a new query.
    pub fn record_search(&mut self, criteria: SearchCriteria, outcome: SearchOutcome) {
        self.last_search = Some(SearchSnapshot {
            criteria,
            items: outcome.items,
            error: outcome.error.map(|e| e.to_string()),
        });
    }

    pub fn last_search(&self) -> Option<&SearchSnapshot> {
        self.last_search.as_ref()
    }

    pub fn has_searched(&self) -> bool {
        self.last_search.is_some()
    }

    /// Text boxes are pre-filled with the last submitted values.
    pub fn form_defaults(&self) -> SearchForm {
        self.last_search
            .as_ref()
            .map(|s| SearchForm::from(&s.criteria))
            .unwrap_or_default()
    }

    pub fn item(&self, index: usize) -> Option<&GridItem> {
        self.last_search.as_ref()?.items.get(index)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
