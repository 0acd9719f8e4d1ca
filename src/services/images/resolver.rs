use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::database::models::CatalogEntry;

pub const TMDB_CDN_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// What to do with an entry that has no poster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagePolicy {
    /// Drop it from the grid
    #[default]
    Exclude,
    /// Keep it; the card renders without an image
    Placeholder,
}

impl fmt::Display for ImagePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImagePolicy::Exclude => write!(f, "exclude"),
            ImagePolicy::Placeholder => write!(f, "placeholder"),
        }
    }
}

impl FromStr for ImagePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclude" => Ok(ImagePolicy::Exclude),
            "placeholder" => Ok(ImagePolicy::Placeholder),
            _ => Err(format!("Unknown image policy: {s}")),
        }
    }
}

/// A ranked entry decorated with its display image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    pub entry: CatalogEntry,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageResolver {
    base: String,
    policy: ImagePolicy,
}

impl ImageResolver {
    pub fn new(base: impl Into<String>, policy: ImagePolicy) -> Self {
        Self {
            base: base.into(),
            policy,
        }
    }

    pub fn policy(&self) -> ImagePolicy {
        self.policy
    }

    /// `base/path` with exactly one slash between, or `None` for a blank path.
    /// No existence check is made.
    pub fn url_for(&self, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        Some(format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    pub fn resolve(&self, entry: CatalogEntry) -> Option<GridItem> {
        let image_url = self.url_for(entry.poster_path.as_deref());
        match (image_url, self.policy) {
            (None, ImagePolicy::Exclude) => {
                log::debug!("Dropping entry {} from grid: no poster", entry.id);
                None
            }
            (image_url, _) => Some(GridItem { entry, image_url }),
        }
    }

    pub fn decorate(&self, entries: Vec<CatalogEntry>) -> Vec<GridItem> {
        entries
            .into_iter()
            .filter_map(|entry| self.resolve(entry))
            .collect()
    }
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(TMDB_CDN_BASE, ImagePolicy::default())
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
