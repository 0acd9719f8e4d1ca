//! Serializable view models handed to the UI, and the formatting rules for
//! missing values.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::database::models::CatalogEntry;
use crate::services::images::resolver::{GridItem, ImageResolver};
use crate::services::search::criteria::SearchForm;
use crate::services::session::navigation::NavigationState;
use crate::services::session::BrowseSession;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NOT_PROVIDED: &str = "Not available";
pub const PROMPT_MESSAGE: &str =
    "Enter a genre, title, overview or company and press Search to see results.";
pub const NO_RESULTS_MESSAGE: &str = "No results found for the given criteria.";
pub const NO_IMAGE_MESSAGE: &str = "No image available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCard {
    /// Position in the result list; pass it back to `select_cmd`
    pub index: usize,
    pub id: i64,
    pub label: String,
    pub image_url: Option<String>,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub form: SearchForm,
    pub notice: Option<Notice>,
    pub rows: Vec<Vec<GridCard>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: i64,
    pub heading: String,
    pub backdrop_url: Option<String>,
    pub poster_url: Option<String>,
    pub poster_notice: Option<String>,
    pub rating: String,
    pub language: String,
    pub runtime: String,
    pub popularity: String,
    pub status: String,
    pub budget: String,
    pub revenue: String,
    pub genres: String,
    pub companies: String,
    pub tagline: Option<String>,
    pub overview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PageView {
    List(ListView),
    Detail(DetailView),
}

/// Four-digit year of a release date, or `N/A`.
pub fn release_year(date: Option<&str>) -> String {
    let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return parsed.year().to_string();
    }
    // Timestamps and partial dates still start with the year
    match date.get(..4) {
        Some(year) if year.chars().all(|c| c.is_ascii_digit()) => year.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn title_or_na(entry: &CatalogEntry) -> &str {
    entry
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

/// "Title (YYYY)"
pub fn title_line(entry: &CatalogEntry) -> String {
    format!(
        "{} ({})",
        title_or_na(entry),
        release_year(entry.release_date.as_deref())
    )
}

/// Whole dollars with thousands separators: 1234567.4 → "$1,234,567".
pub fn format_money(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn joined_or(labels: Vec<String>, fallback: &str) -> String {
    if labels.is_empty() {
        fallback.to_string()
    } else {
        labels.join(", ")
    }
}

pub fn grid_card(index: usize, item: &GridItem) -> GridCard {
    GridCard {
        index,
        id: item.entry.id,
        label: title_line(&item.entry),
        image_url: item.image_url.clone(),
        rating: item
            .entry
            .vote_average
            .map(|r| format!("{r:.1} ⭐"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

pub fn list_view(session: &BrowseSession, grid_columns: usize) -> ListView {
    let form = session.form_defaults();
    let Some(snapshot) = session.last_search() else {
        return ListView {
            form,
            notice: Some(Notice::new(NoticeLevel::Info, PROMPT_MESSAGE)),
            rows: Vec::new(),
        };
    };

    if let Some(error) = &snapshot.error {
        return ListView {
            form,
            notice: Some(Notice::new(
                NoticeLevel::Error,
                format!("Error running the query: {error}"),
            )),
            rows: Vec::new(),
        };
    }

    if snapshot.items.is_empty() {
        return ListView {
            form,
            notice: Some(Notice::new(NoticeLevel::Warning, NO_RESULTS_MESSAGE)),
            rows: Vec::new(),
        };
    }

    let cards: Vec<GridCard> = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| grid_card(i, item))
        .collect();
    ListView {
        form,
        notice: None,
        rows: cards
            .chunks(grid_columns.max(1))
            .map(<[GridCard]>::to_vec)
            .collect(),
    }
}

pub fn detail_view(entry: &CatalogEntry, resolver: &ImageResolver) -> DetailView {
    let poster_url = resolver.url_for(entry.poster_path.as_deref());
    let poster_notice = poster_url.is_none().then(|| NO_IMAGE_MESSAGE.to_string());

    let rating = match entry.vote_average {
        Some(avg) => format!(
            "{avg:.2} ⭐ ({} votes)",
            entry
                .vote_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
        None => NOT_AVAILABLE.to_string(),
    };

    DetailView {
        id: entry.id,
        heading: title_line(entry),
        backdrop_url: resolver.url_for(entry.backdrop_path.as_deref()),
        poster_url,
        poster_notice,
        rating,
        language: text_or(entry.original_language.as_deref(), NOT_AVAILABLE).to_uppercase(),
        runtime: entry
            .runtime
            .map(|m| format!("{m} minutes"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        popularity: entry
            .popularity
            .map(|p| format!("{p:.1}"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        status: text_or(entry.status.as_deref(), NOT_AVAILABLE),
        budget: entry
            .budget
            .map(format_money)
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        revenue: entry
            .revenue
            .map(format_money)
            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
        genres: joined_or(entry.genre_labels(), NOT_PROVIDED),
        companies: joined_or(entry.company_names(), NOT_PROVIDED),
        tagline: entry
            .tagline
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        overview: text_or(entry.overview.as_deref(), NOT_PROVIDED),
    }
}

/// Render whatever the session currently shows.
pub fn page_view(session: &BrowseSession, resolver: &ImageResolver, grid_columns: usize) -> PageView {
    match &session.navigation {
        NavigationState::List => PageView::List(list_view(session, grid_columns)),
        NavigationState::Detail(entry) => PageView::Detail(detail_view(entry, resolver)),
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
