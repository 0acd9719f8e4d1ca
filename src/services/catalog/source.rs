//! Read-only access to the catalog table, with an optional per-query cache.

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use log::{debug, error};
use lru::LruCache;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::database::catalog_repo;
use crate::database::models::CatalogEntry;
use crate::services::config::{validate_table_name, AppConfig};
use crate::services::search::criteria::SearchCriteria;
use crate::types::errors::{CatalogError, CatalogResult};

/// A request the source can answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CatalogQuery {
    /// Every row, for in-memory ranking
    All,
    /// Filtering, ordering and truncation done by the database
    TopMatching {
        criteria: SearchCriteria,
        limit: usize,
    },
}

impl CatalogQuery {
    /// Cache key: BLAKE3 of the table and the serialized query.
    pub fn fingerprint(&self, table: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(table.as_bytes());
        hasher.update(&[0]);
        // Serializing plain data into a Vec cannot fail
        let body = serde_json::to_vec(self).unwrap_or_default();
        hasher.update(&body);
        hasher.finalize().to_hex().to_string()
    }
}

/// Result of [`CatalogSource::fetch`]: rows, or no rows plus the reason.
#[derive(Debug)]
pub struct Fetched {
    pub entries: Arc<Vec<CatalogEntry>>,
    pub error: Option<CatalogError>,
}

type QueryCache = Mutex<LruCache<String, Arc<Vec<CatalogEntry>>>>;

pub struct CatalogSource {
    pool: SqlitePool,
    table: String,
    cache: Option<QueryCache>,
}

impl CatalogSource {
    /// Build a read-only source from config. The pool connects lazily, so a
    /// bad URL or unreachable file is reported by the first fetch instead of here.
    pub fn connect(config: &AppConfig) -> CatalogResult<Self> {
        let opts = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| CatalogError::Config(format!("Invalid database URL: {e}")))?
            .read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_lazy_with(opts);
        Self::from_pool(pool, &config.table, config.query_cache)
    }

    pub fn from_pool(pool: SqlitePool, table: &str, cache_capacity: usize) -> CatalogResult<Self> {
        validate_table_name(table)?;
        let cache = NonZeroUsize::new(cache_capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Ok(Self {
            pool,
            table: table.to_string(),
            cache,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn cached(&self, key: &str) -> Option<Arc<Vec<CatalogEntry>>> {
        let cache = self.cache.as_ref()?;
        let mut guard = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.get(key).cloned()
    }

    fn remember(&self, key: String, entries: Arc<Vec<CatalogEntry>>) {
        if let Some(cache) = &self.cache {
            cache
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .put(key, entries);
        }
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clear();
        }
    }

    pub async fn try_fetch(&self, query: &CatalogQuery) -> CatalogResult<Arc<Vec<CatalogEntry>>> {
        let key = query.fingerprint(&self.table);
        if let Some(hit) = self.cached(&key) {
            debug!("[Catalog] cache hit for {query:?}");
            return Ok(hit);
        }

        let rows = match query {
            CatalogQuery::All => catalog_repo::fetch_all_entries(&self.pool, &self.table).await?,
            CatalogQuery::TopMatching { criteria, limit } => {
                catalog_repo::fetch_top_matching(&self.pool, &self.table, criteria, *limit).await?
            }
        };
        debug!("[Catalog] {} rows for {query:?}", rows.len());

        let rows = Arc::new(rows);
        self.remember(key, Arc::clone(&rows));
        Ok(rows)
    }

    /// Row count, uncached. Used as a startup probe.
    pub async fn count(&self) -> CatalogResult<i64> {
        Ok(catalog_repo::count_entries(&self.pool, &self.table).await?)
    }

    /// Like [`try_fetch`](Self::try_fetch) but never fails: an error is logged
    /// and handed back next to an empty row set.
    pub async fn fetch(&self, query: &CatalogQuery) -> Fetched {
        match self.try_fetch(query).await {
            Ok(entries) => Fetched {
                entries,
                error: None,
            },
            Err(e) => {
                error!("[Catalog] query on {} failed: {e}", self.table);
                Fetched {
                    entries: Arc::new(Vec::new()),
                    error: Some(e),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
