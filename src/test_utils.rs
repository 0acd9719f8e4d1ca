use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Once;

use crate::database::models::CatalogEntry;

static INIT: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

pub async fn init_test_db() -> TestContext {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });

    // Single connection: every new connection to sqlite::memory: is a fresh database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    TestContext { pool }
}

/// Insert entries into `catalog_entries`, all columns bound.
pub async fn seed_entries(pool: &Pool<Sqlite>, entries: &[CatalogEntry]) {
    for e in entries {
        sqlx::query(
            "INSERT INTO catalog_entries (
                id, title, overview, genres, production_companies, release_date,
                vote_average, vote_count, poster_path, backdrop_path, adult,
                runtime, budget, revenue, popularity, original_language, status, tagline
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(e.id)
        .bind(&e.title)
        .bind(&e.overview)
        .bind(&e.genres)
        .bind(&e.production_companies)
        .bind(&e.release_date)
        .bind(e.vote_average)
        .bind(e.vote_count)
        .bind(&e.poster_path)
        .bind(&e.backdrop_path)
        .bind(e.adult)
        .bind(e.runtime)
        .bind(e.budget)
        .bind(e.revenue)
        .bind(e.popularity)
        .bind(&e.original_language)
        .bind(&e.status)
        .bind(&e.tagline)
        .execute(pool)
        .await
        .expect("insert catalog entry");
    }
}

/// A rated movie with a poster; tests override the rest with struct update syntax.
pub fn movie(id: i64, title: &str, genres: &str, rating: f64) -> CatalogEntry {
    CatalogEntry {
        id,
        title: Some(title.to_string()),
        genres: Some(genres.to_string()),
        vote_average: Some(rating),
        vote_count: Some(100),
        poster_path: Some(format!("/poster{id}.jpg")),
        release_date: Some("2001-07-20".to_string()),
        adult: Some(false),
        ..Default::default()
    }
}
