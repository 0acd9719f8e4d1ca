//! Application state shared by every session, and the startup probe.

use serde::Serialize;

use crate::services::catalog::CatalogSource;
use crate::services::config::AppConfig;
use crate::services::images::resolver::ImageResolver;
use crate::types::errors::CatalogResult;

/// Long-lived pieces built once from config. Sessions borrow it.
pub struct AppState {
    pub config: AppConfig,
    pub source: CatalogSource,
    pub resolver: ImageResolver,
}

impl AppState {
    pub fn init(config: AppConfig) -> CatalogResult<Self> {
        let source = CatalogSource::connect(&config)?;
        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: AppConfig, source: CatalogSource) -> Self {
        let resolver = ImageResolver::new(config.cdn_base.clone(), config.image_policy);
        Self {
            config,
            source,
            resolver,
        }
    }
}

/// What the catalog looked like at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CatalogStatus {
    Ready { entries: i64 },
    Empty,
    Unavailable { reason: String },
}

/// Count the rows once so a broken connection is reported before the first
/// search. Never fails; problems come back as `Unavailable`.
pub async fn check_catalog_status(source: &CatalogSource) -> CatalogStatus {
    match source.count().await {
        Ok(0) => CatalogStatus::Empty,
        Ok(entries) => CatalogStatus::Ready { entries },
        Err(e) => {
            log::error!("Catalog {} unavailable: {e}", source.table());
            CatalogStatus::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/app_service_tests.rs"]
mod tests;
