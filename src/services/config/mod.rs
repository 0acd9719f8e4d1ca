pub mod models;

pub use models::*;

use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::types::errors::{CatalogError, CatalogResult};

pub const ENV_DATABASE_URL: &str = "CATALOG_DATABASE_URL";
pub const ENV_TABLE: &str = "CATALOG_TABLE";
pub const ENV_CDN_BASE: &str = "CATALOG_CDN_BASE";
pub const ENV_IMAGE_POLICY: &str = "CATALOG_IMAGE_POLICY";
pub const ENV_SEARCH_MODE: &str = "CATALOG_SEARCH_MODE";
pub const ENV_QUERY_CACHE: &str = "CATALOG_QUERY_CACHE";
pub const ENV_GRID_COLUMNS: &str = "CATALOG_GRID_COLUMNS";

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
pub fn validate_table_name(name: &str) -> CatalogResult<()> {
    if identifier_re().is_match(name) {
        Ok(())
    } else {
        Err(CatalogError::Config(format!(
            "{ENV_TABLE} must be a plain SQL identifier, got {name:?}"
        )))
    }
}

impl AppConfig {
    /// Load from the process environment. A `.env` file in the working
    /// directory is read first when present.
    pub fn from_env() -> CatalogResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup. Unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = AppConfig::default();

        let table = get(ENV_TABLE).unwrap_or(defaults.table);
        validate_table_name(&table)?;

        let config = AppConfig {
            database_url: get(ENV_DATABASE_URL).unwrap_or(defaults.database_url),
            table,
            cdn_base: get(ENV_CDN_BASE).unwrap_or(defaults.cdn_base),
            image_policy: parse_or(get(ENV_IMAGE_POLICY), ENV_IMAGE_POLICY, defaults.image_policy)?,
            search_mode: parse_or(get(ENV_SEARCH_MODE), ENV_SEARCH_MODE, defaults.search_mode)?,
            query_cache: parse_or(get(ENV_QUERY_CACHE), ENV_QUERY_CACHE, defaults.query_cache)?,
            grid_columns: parse_or(get(ENV_GRID_COLUMNS), ENV_GRID_COLUMNS, defaults.grid_columns)?,
        };

        if config.grid_columns == 0 {
            return Err(CatalogError::Config(format!(
                "{ENV_GRID_COLUMNS} must be at least 1"
            )));
        }

        log::debug!(
            "Config loaded: table={}, mode={:?}, images={:?}, cache={}",
            config.table,
            config.search_mode,
            config.image_policy,
            config.query_cache
        );
        Ok(config)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> CatalogResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|e| CatalogError::Config(format!("{key}: {e}"))),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
