use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::models::CatalogEntry;
use crate::services::search::criteria::SearchCriteria;

/// Every row of the catalog, in primary key order.
///
/// `table` is interpolated, so callers must pass a validated identifier
/// (see `AppConfig::table`).
pub async fn fetch_all_entries(
    pool: &SqlitePool,
    table: &str,
) -> Result<Vec<CatalogEntry>, sqlx::Error> {
    let query = format!("SELECT * FROM {table} ORDER BY id");
    sqlx::query_as::<_, CatalogEntry>(&query)
        .fetch_all(pool)
        .await
}

pub async fn count_entries(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&query).fetch_one(pool).await
}

/// Escape LIKE wildcards so user text is matched literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Server-side search: every criterion becomes a bound predicate, ordering
/// and truncation happen in the query.
pub async fn fetch_top_matching(
    pool: &SqlitePool,
    table: &str,
    criteria: &SearchCriteria,
    limit: usize,
) -> Result<Vec<CatalogEntry>, sqlx::Error> {
    let mut qb = build_top_matching_query(table, criteria, limit);
    qb.build_query_as::<CatalogEntry>().fetch_all(pool).await
}

pub fn build_top_matching_query(
    table: &str,
    criteria: &SearchCriteria,
    limit: usize,
) -> QueryBuilder<'static, Sqlite> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT * FROM {table} WHERE 1 = 1"));

    for (field, value) in criteria.text_filters() {
        let pattern = format!("%{}%", escape_like(&value.to_lowercase()));
        qb.push(format!(" AND LOWER({}) LIKE ", field.column()));
        qb.push_bind(pattern);
        qb.push(" ESCAPE '\\'");
    }

    if criteria.adult_only {
        qb.push(" AND adult = 1");
    }

    // NULL ratings sort last under DESC; id keeps ties in fetch order
    qb.push(" ORDER BY vote_average DESC, id ASC LIMIT ");
    qb.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));

    qb
}

#[cfg(test)]
#[path = "tests/catalog_repo_test.rs"]
mod tests;
