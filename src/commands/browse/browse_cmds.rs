use crate::commands::browse::views::{self, PageView};
use crate::services::app::app_service::AppState;
use crate::services::search::criteria::SearchForm;
use crate::services::search::run_search;
use crate::services::session::navigation::ViewMode;
use crate::services::session::BrowseSession;
use crate::types::errors::{CatalogError, CatalogResult};

/// Submit the search form. Only offered on the list view.
pub async fn search_cmd(
    state: &AppState,
    session: &mut BrowseSession,
    form: SearchForm,
) -> CatalogResult<PageView> {
    if session.navigation.mode() != ViewMode::List {
        return Err(CatalogError::Navigation(
            "search is only available from the list view".into(),
        ));
    }

    let criteria = form.into_criteria();
    let outcome = run_search(
        &state.source,
        &state.resolver,
        state.config.search_mode,
        &criteria,
    )
    .await;
    session.record_search(criteria, outcome);

    Ok(current_view_cmd(state, session))
}

/// Open the detail page for the card at `index` of the last search.
pub fn select_cmd(
    state: &AppState,
    session: &mut BrowseSession,
    index: usize,
) -> CatalogResult<PageView> {
    let entry = session
        .item(index)
        .map(|item| item.entry.clone())
        .ok_or_else(|| CatalogError::NotFound(format!("no result at position {index}")))?;
    session.navigation.select(entry)?;
    Ok(current_view_cmd(state, session))
}

/// Return to the list. The previous grid is shown again from the session,
/// the data source is not queried.
pub fn back_cmd(state: &AppState, session: &mut BrowseSession) -> CatalogResult<PageView> {
    session.navigation.back()?;
    Ok(current_view_cmd(state, session))
}

pub fn current_view_cmd(state: &AppState, session: &BrowseSession) -> PageView {
    views::page_view(session, &state.resolver, state.config.grid_columns)
}

#[cfg(test)]
#[path = "tests/browse_cmds_tests.rs"]
mod tests;
