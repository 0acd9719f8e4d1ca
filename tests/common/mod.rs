use cinescope_lib::database::models::CatalogEntry;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Once;

static INIT: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

pub async fn init_test_db() -> TestContext {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

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

pub async fn insert_entry(pool: &Pool<Sqlite>, e: &CatalogEntry) {
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
