use serde::{Deserialize, Serialize};

use crate::services::images::resolver::{ImagePolicy, TMDB_CDN_BASE};
use crate::services::search::SearchMode;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db";
pub const DEFAULT_TABLE: &str = "catalog_entries";
pub const DEFAULT_QUERY_CACHE: usize = 16;
pub const DEFAULT_GRID_COLUMNS: usize = 5;

/// Runtime configuration, read from the environment at startup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    /// Validated SQL identifier; safe to interpolate into queries.
    pub table: String,
    pub cdn_base: String,
    pub image_policy: ImagePolicy,
    pub search_mode: SearchMode,
    /// LRU capacity of the query cache, 0 disables caching
    pub query_cache: usize,
    pub grid_columns: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            table: DEFAULT_TABLE.into(),
            cdn_base: TMDB_CDN_BASE.into(),
            image_policy: ImagePolicy::default(),
            search_mode: SearchMode::default(),
            query_cache: DEFAULT_QUERY_CACHE,
            grid_columns: DEFAULT_GRID_COLUMNS,
        }
    }
}
