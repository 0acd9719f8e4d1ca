use cinescope_lib::commands::browse::browse_cmds::{back_cmd, search_cmd, select_cmd};
use cinescope_lib::commands::browse::views::{NoticeLevel, PageView};
use cinescope_lib::database::models::CatalogEntry;
use cinescope_lib::services::app::app_service::AppState;
use cinescope_lib::services::catalog::CatalogSource;
use cinescope_lib::services::config::AppConfig;
use cinescope_lib::services::images::resolver::ImagePolicy;
use cinescope_lib::services::search::criteria::SearchForm;
use cinescope_lib::services::session::navigation::ViewMode;
use cinescope_lib::services::session::BrowseSession;
mod common;

fn film(id: i64, title: &str, genres: &str, rating: f64) -> CatalogEntry {
    CatalogEntry {
        id,
        title: Some(title.to_string()),
        genres: Some(genres.to_string()),
        vote_average: Some(rating),
        vote_count: Some(50),
        poster_path: Some(format!("/{id}.jpg")),
        release_date: Some("2015-05-01".to_string()),
        adult: Some(false),
        ..Default::default()
    }
}

/// 15 rows, three of them comedies rated 8.1 / 7.5 / 6.9.
async fn seed_fifteen(pool: &sqlx::SqlitePool) {
    for i in 0..12 {
        common::insert_entry(pool, &film(i, &format!("Thriller {i}"), "Thriller", 4.0 + i as f64 * 0.1))
            .await;
    }
    common::insert_entry(pool, &film(20, "Comedy Low", "Comedy", 6.9)).await;
    common::insert_entry(pool, &film(21, "Comedy High", "Comedy, Family", 8.1)).await;
    common::insert_entry(pool, &film(22, "Comedy Mid", "Dark Comedy", 7.5)).await;
}

async fn state_with(config: AppConfig) -> AppState {
    let ctx = common::init_test_db().await;
    seed_fifteen(&ctx.pool).await;
    let source = CatalogSource::from_pool(ctx.pool, &config.table, config.query_cache).unwrap();
    AppState::with_source(config, source)
}

fn cards(view: &PageView) -> Vec<(i64, String)> {
    match view {
        PageView::List(list) => list
            .rows
            .iter()
            .flatten()
            .map(|c| (c.id, c.rating.clone()))
            .collect(),
        PageView::Detail(_) => panic!("Expected list view"),
    }
}

#[tokio::test]
async fn comedy_search_then_detail_and_back() {
    let state = state_with(AppConfig::default()).await;
    let mut session = BrowseSession::new();

    let form = SearchForm {
        genre: "COMEDY".into(),
        ..Default::default()
    };
    let view = search_cmd(&state, &mut session, form).await.unwrap();
    assert_eq!(
        cards(&view),
        vec![
            (21, "8.1 ⭐".to_string()),
            (22, "7.5 ⭐".to_string()),
            (20, "6.9 ⭐".to_string()),
        ]
    );

    let view = select_cmd(&state, &mut session, 2).unwrap();
    match view {
        PageView::Detail(detail) => {
            assert_eq!(detail.heading, "Comedy Low (2015)");
            assert_eq!(detail.rating, "6.90 ⭐ (50 votes)");
            assert_eq!(detail.overview, "Not available");
        }
        PageView::List(_) => panic!("Expected detail view"),
    }
    assert_eq!(session.navigation.mode(), ViewMode::Detail);

    let view = back_cmd(&state, &mut session).unwrap();
    assert_eq!(session.navigation.mode(), ViewMode::List);
    assert!(session.navigation.selected().is_none());
    assert_eq!(cards(&view).len(), 3);
}

#[tokio::test]
async fn no_criteria_returns_top_ten_in_grid_rows_of_five() {
    let state = state_with(AppConfig::default()).await;
    let mut session = BrowseSession::new();

    let view = search_cmd(&state, &mut session, SearchForm::default()).await.unwrap();
    let PageView::List(list) = &view else {
        panic!("Expected list view");
    };
    assert_eq!(list.rows.len(), 2);
    assert!(list.rows.iter().all(|row| row.len() == 5));

    let ids: Vec<i64> = cards(&view).into_iter().map(|(id, _)| id).collect();
    assert_eq!(&ids[..3], &[21, 22, 20]);
    assert_eq!(&ids[3..], &[11, 10, 9, 8, 7, 6, 5]);
}

#[tokio::test]
async fn adult_only_search_with_no_adult_rows_warns() {
    let state = state_with(AppConfig::default()).await;
    let mut session = BrowseSession::new();

    let form = SearchForm {
        genre: "comedy".into(),
        adult_only: true,
        ..Default::default()
    };
    let view = search_cmd(&state, &mut session, form).await.unwrap();
    match view {
        PageView::List(list) => {
            assert!(list.rows.is_empty());
            assert_eq!(list.notice.unwrap().level, NoticeLevel::Warning);
        }
        PageView::Detail(_) => panic!("Expected list view"),
    }
}

#[tokio::test]
async fn placeholder_policy_keeps_posterless_rows() {
    let ctx = common::init_test_db().await;
    let mut bare = film(1, "Bare", "Drama", 9.0);
    bare.poster_path = None;
    common::insert_entry(&ctx.pool, &bare).await;
    common::insert_entry(&ctx.pool, &film(2, "Dressed", "Drama", 8.0)).await;

    for (policy, expected) in [(ImagePolicy::Exclude, vec![2]), (ImagePolicy::Placeholder, vec![1, 2])] {
        let config = AppConfig {
            image_policy: policy,
            ..AppConfig::default()
        };
        let source = CatalogSource::from_pool(ctx.pool.clone(), &config.table, 0).unwrap();
        let state = AppState::with_source(config, source);
        let mut session = BrowseSession::new();

        let view = search_cmd(&state, &mut session, SearchForm::default()).await.unwrap();
        let ids: Vec<i64> = cards(&view).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, expected, "policy {policy}");
    }
}

#[tokio::test]
async fn unreachable_table_reports_error_and_session_continues() {
    let ctx = common::init_test_db().await;
    let config = AppConfig {
        table: "renamed_table".into(),
        ..AppConfig::default()
    };
    let source = CatalogSource::from_pool(ctx.pool.clone(), &config.table, 4).unwrap();
    let state = AppState::with_source(config, source);
    let mut session = BrowseSession::new();

    let view = search_cmd(&state, &mut session, SearchForm::default()).await.unwrap();
    match view {
        PageView::List(list) => {
            let notice = list.notice.unwrap();
            assert_eq!(notice.level, NoticeLevel::Error);
            assert!(notice.message.contains("renamed_table"));
        }
        PageView::Detail(_) => panic!("Expected list view"),
    }

    sqlx::query("CREATE TABLE renamed_table (id INTEGER PRIMARY KEY, title TEXT, vote_average REAL, poster_path TEXT)")
        .execute(&ctx.pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO renamed_table VALUES (1, 'Back Online', 7.0, '/b.jpg')")
        .execute(&ctx.pool)
        .await
        .unwrap();

    let view = search_cmd(&state, &mut session, SearchForm::default()).await.unwrap();
    assert_eq!(cards(&view), vec![(1, "7.0 ⭐".to_string())]);
}

#[tokio::test]
async fn detail_view_shows_revenue_popularity_and_tagline() {
    let ctx = common::init_test_db().await;
    let mut entry = film(7, "Box Office", "Drama", 7.2);
    entry.budget = Some(15_000_000.0);
    entry.revenue = Some(1_234_567.4);
    entry.popularity = Some(42.0);
    entry.tagline = Some("Every seat sold.".to_string());
    common::insert_entry(&ctx.pool, &entry).await;

    let config = AppConfig::default();
    let source = CatalogSource::from_pool(ctx.pool, &config.table, 0).unwrap();
    let state = AppState::with_source(config, source);
    let mut session = BrowseSession::new();

    search_cmd(&state, &mut session, SearchForm::default()).await.unwrap();
    match select_cmd(&state, &mut session, 0).unwrap() {
        PageView::Detail(detail) => {
            assert_eq!(detail.budget, "$15,000,000");
            assert_eq!(detail.revenue, "$1,234,567");
            assert_eq!(detail.popularity, "42.0");
            assert_eq!(detail.tagline.as_deref(), Some("Every seat sold."));
        }
        PageView::List(_) => panic!("Expected detail view"),
    }
}
