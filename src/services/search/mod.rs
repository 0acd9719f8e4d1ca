pub mod criteria;
pub mod rank;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::services::catalog::{CatalogQuery, CatalogSource};
use crate::services::images::resolver::{GridItem, ImageResolver};
use crate::types::errors::CatalogError;
use criteria::SearchCriteria;
use rank::TOP_N;

/// Where filtering and ranking happen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Fetch the whole table once (cached) and rank in memory
    #[default]
    InMemory,
    /// Bound predicates, ORDER BY and LIMIT run in the database
    Pushdown,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::InMemory => write!(f, "memory"),
            SearchMode::Pushdown => write!(f, "pushdown"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(SearchMode::InMemory),
            "pushdown" | "server" => Ok(SearchMode::Pushdown),
            _ => Err(format!("Unknown search mode: {s}")),
        }
    }
}

/// Decorated results of one search. `error` is set when the data source
/// failed, in which case `items` is empty.
#[derive(Debug)]
pub struct SearchOutcome {
    pub items: Vec<GridItem>,
    pub error: Option<CatalogError>,
}

/// Fetch, rank and decorate. Never fails; a source error travels in the outcome.
pub async fn run_search(
    source: &CatalogSource,
    resolver: &ImageResolver,
    mode: SearchMode,
    criteria: &SearchCriteria,
) -> SearchOutcome {
    if criteria.is_empty() {
        log::info!("Searching ({mode}) with no criteria, top rated overall");
    } else {
        log::info!("Searching ({mode}) with {criteria:?}");
    }

    // SQLite LOWER/LIKE fold ASCII only, so non-ASCII text is matched in memory
    let mode = match mode {
        SearchMode::Pushdown if !criteria.is_ascii() => {
            log::debug!("Non-ASCII criteria, ranking in memory instead of pushdown");
            SearchMode::InMemory
        }
        other => other,
    };

    let query = match mode {
        SearchMode::InMemory => CatalogQuery::All,
        SearchMode::Pushdown => CatalogQuery::TopMatching {
            criteria: criteria.clone(),
            limit: TOP_N,
        },
    };
    let fetched = source.fetch(&query).await;
    if let Some(error) = fetched.error {
        return SearchOutcome {
            items: Vec::new(),
            error: Some(error),
        };
    }

    let ranked = match mode {
        SearchMode::InMemory => rank::rank(&fetched.entries, criteria),
        SearchMode::Pushdown => fetched.entries.as_ref().clone(),
    };

    let items = resolver.decorate(ranked);
    log::info!("Search returned {} grid items", items.len());
    SearchOutcome { items, error: None }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
