use serde::{Deserialize, Serialize};

use crate::database::models::CatalogEntry;

/// Text predicates a search can carry. Both the in-memory ranker and the
/// pushdown query walk this list, so adding a field here covers both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Genre,
    Title,
    Overview,
    Company,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::Genre,
        TextField::Title,
        TextField::Overview,
        TextField::Company,
    ];

    /// Column in the catalog table holding this field.
    pub fn column(self) -> &'static str {
        match self {
            TextField::Genre => "genres",
            TextField::Title => "title",
            TextField::Overview => "overview",
            TextField::Company => "production_companies",
        }
    }

    pub fn value(self, entry: &CatalogEntry) -> Option<&str> {
        match self {
            TextField::Genre => entry.genres.as_deref(),
            TextField::Title => entry.title.as_deref(),
            TextField::Overview => entry.overview.as_deref(),
            TextField::Company => entry.production_companies.as_deref(),
        }
    }
}

/// User supplied filters. `None` means "no constraint" for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub genre: Option<String>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub company: Option<String>,
    pub adult_only: bool,
}

impl SearchCriteria {
    /// Trim every text field and drop the ones left empty.
    pub fn normalized(self) -> Self {
        Self {
            genre: clean(self.genre),
            title: clean(self.title),
            overview: clean(self.overview),
            company: clean(self.company),
            adult_only: self.adult_only,
        }
    }

    pub fn get(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Genre => self.genre.as_deref(),
            TextField::Title => self.title.as_deref(),
            TextField::Overview => self.overview.as_deref(),
            TextField::Company => self.company.as_deref(),
        }
    }

    /// Present text predicates, in `TextField::ALL` order.
    pub fn text_filters(&self) -> impl Iterator<Item = (TextField, &str)> + '_ {
        TextField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    /// True when every text predicate can be case-folded by the database.
    pub fn is_ascii(&self) -> bool {
        self.text_filters().all(|(_, value)| value.is_ascii())
    }

    pub fn is_empty(&self) -> bool {
        !self.adult_only && self.text_filters().next().is_none()
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Raw search form as the UI holds it: plain text boxes and one checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchForm {
    pub genre: String,
    pub title: String,
    pub overview: String,
    pub company: String,
    pub adult_only: bool,
}

impl SearchForm {
    pub fn into_criteria(self) -> SearchCriteria {
        SearchCriteria {
            genre: Some(self.genre),
            title: Some(self.title),
            overview: Some(self.overview),
            company: Some(self.company),
            adult_only: self.adult_only,
        }
        .normalized()
    }
}

impl From<&SearchCriteria> for SearchForm {
    fn from(criteria: &SearchCriteria) -> Self {
        Self {
            genre: criteria.genre.clone().unwrap_or_default(),
            title: criteria.title.clone().unwrap_or_default(),
            overview: criteria.overview.clone().unwrap_or_default(),
            company: criteria.company.clone().unwrap_or_default(),
            adult_only: criteria.adult_only,
        }
    }
}

#[cfg(test)]
#[path = "tests/criteria_tests.rs"]
mod tests;
