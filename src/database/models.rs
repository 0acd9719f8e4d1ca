use serde::{Deserialize, Serialize};

/// One row of the catalog table (a movie or a TV show).
///
/// Only `id` is required. Every other column may be NULL or missing from the
/// query entirely; `#[sqlx(default)]` turns a missing column into `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogEntry {
    pub id: i64,
    #[sqlx(default)]
    pub title: Option<String>,
    #[sqlx(default)]
    pub overview: Option<String>,
    /// Delimited genre labels, e.g. "Action, Comedy"
    #[sqlx(default)]
    pub genres: Option<String>,
    /// Delimited production company (or TV network) names
    #[sqlx(default)]
    pub production_companies: Option<String>,
    #[sqlx(default)]
    pub release_date: Option<String>,
    #[sqlx(default)]
    pub vote_average: Option<f64>,
    #[sqlx(default)]
    pub vote_count: Option<i64>,
    #[sqlx(default)]
    pub poster_path: Option<String>,
    #[sqlx(default)]
    pub backdrop_path: Option<String>,
    #[sqlx(default)]
    pub adult: Option<bool>,
    #[sqlx(default)]
    pub runtime: Option<i64>,
    #[sqlx(default)]
    pub budget: Option<f64>,
    #[sqlx(default)]
    pub revenue: Option<f64>,
    #[sqlx(default)]
    pub popularity: Option<f64>,
    #[sqlx(default)]
    pub original_language: Option<String>,
    #[sqlx(default)]
    pub status: Option<String>,
    #[sqlx(default)]
    pub tagline: Option<String>,
}

impl CatalogEntry {
    /// NULL adult flags count as not adult.
    pub fn is_adult(&self) -> bool {
        self.adult.unwrap_or(false)
    }

    pub fn genre_labels(&self) -> Vec<String> {
        split_labels(self.genres.as_deref())
    }

    pub fn company_names(&self) -> Vec<String> {
        split_labels(self.production_companies.as_deref())
    }
}

/// Split a delimited label column. Accepts `,`, `|` and `;` separators.
fn split_labels(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split([',', '|', ';'])
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/models_tests.rs"]
mod tests;
