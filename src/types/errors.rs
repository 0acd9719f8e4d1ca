use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Navigation error: {0}")]
    Navigation(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => CatalogError::Connection(error.to_string()),
            sqlx::Error::RowNotFound => CatalogError::NotFound(error.to_string()),
            sqlx::Error::Database(ref db) if is_open_failure(db.code().as_deref()) => {
                CatalogError::Connection(error.to_string())
            }
            other => CatalogError::Query(other.to_string()),
        }
    }
}

/// SQLITE_CANTOPEN and SQLITE_AUTH, including their extended codes.
fn is_open_failure(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .map(|c| matches!(c & 0xff, 14 | 23))
        .unwrap_or(false)
}

// UI hosts receive errors as plain strings
impl Serialize for CatalogError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
