//! Two-view navigation: the result list and the detail page of one entry.
//!
//! ```text
//!     List ──select(entry)──► Detail(entry)
//!      ▲                          │
//!      └──────────back()──────────┘
//! ```

use serde::Serialize;

use crate::database::models::CatalogEntry;
use crate::types::errors::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    List,
    Detail,
}

/// Every legal transition. Anything else is rejected.
pub const TRANSITIONS: &[(ViewMode, ViewMode)] = &[
    (ViewMode::List, ViewMode::Detail),
    (ViewMode::Detail, ViewMode::List),
];

pub fn is_valid_transition(from: ViewMode, to: ViewMode) -> bool {
    TRANSITIONS.contains(&(from, to))
}

/// Current view. The detail variant owns its own copy of the entry, so the
/// result list can be replaced without touching it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NavigationState {
    #[default]
    List,
    Detail(Box<CatalogEntry>),
}

impl NavigationState {
    pub fn mode(&self) -> ViewMode {
        match self {
            NavigationState::List => ViewMode::List,
            NavigationState::Detail(_) => ViewMode::Detail,
        }
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        match self {
            NavigationState::List => None,
            NavigationState::Detail(entry) => Some(&**entry),
        }
    }

    fn guard(&self, to: ViewMode) -> CatalogResult<()> {
        let from = self.mode();
        if is_valid_transition(from, to) {
            Ok(())
        } else {
            log::warn!("Rejected navigation {from:?} -> {to:?}");
            Err(CatalogError::Navigation(format!(
                "cannot go from {from:?} to {to:?}"
            )))
        }
    }

    /// List → Detail, keeping `entry`.
    pub fn select(&mut self, entry: CatalogEntry) -> CatalogResult<()> {
        self.guard(ViewMode::Detail)?;
        log::info!("Opening detail view for entry {}", entry.id);
        *self = NavigationState::Detail(Box::new(entry));
        Ok(())
    }

    /// Detail → List, dropping the entry.
    pub fn back(&mut self) -> CatalogResult<()> {
        self.guard(ViewMode::List)?;
        log::info!("Back to list view");
        *self = NavigationState::List;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
