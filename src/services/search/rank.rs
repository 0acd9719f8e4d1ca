use std::cmp::Ordering;

use crate::database::models::CatalogEntry;
use crate::services::search::criteria::SearchCriteria;

/// Number of entries a search returns at most.
pub const TOP_N: usize = 10;

/// True when `entry` satisfies every criterion that is set.
pub fn matches(entry: &CatalogEntry, criteria: &SearchCriteria) -> bool {
    if criteria.adult_only && !entry.is_adult() {
        return false;
    }
    criteria
        .text_filters()
        .all(|(field, needle)| contains_ignore_case(field.value(entry), needle))
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) => h.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

/// Highest rated first. Unrated entries go after every rated one.
fn by_rating_desc(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    match (a.vote_average, b.vote_average) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter, order by rating and keep the top `TOP_N`.
pub fn rank(entries: &[CatalogEntry], criteria: &SearchCriteria) -> Vec<CatalogEntry> {
    rank_with_limit(entries, criteria, TOP_N)
}

/// Same as [`rank`] with an explicit limit. The sort is stable, so entries
/// with equal ratings keep their input order.
pub fn rank_with_limit(
    entries: &[CatalogEntry],
    criteria: &SearchCriteria,
    limit: usize,
) -> Vec<CatalogEntry> {
    let mut kept: Vec<&CatalogEntry> = entries.iter().filter(|e| matches(e, criteria)).collect();
    kept.sort_by(|a, b| by_rating_desc(a, b));
    kept.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
#[path = "tests/rank_tests.rs"]
mod tests;
