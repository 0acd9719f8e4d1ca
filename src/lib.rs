use anyhow::Context;

pub mod commands;
pub mod console;
pub mod database;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

use services::app::app_service::{check_catalog_status, AppState, CatalogStatus};
use services::config::AppConfig;

/// Install the global logger. `RUST_LOG` overrides the default level.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .try_init();
}

async fn start(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::init(config).context("failed to set up the catalog source")?;

    match check_catalog_status(&state.source).await {
        CatalogStatus::Ready { entries } => {
            log::info!("Catalog {} ready: {entries} entries", state.source.table());
        }
        CatalogStatus::Empty => println!("[warning] The catalog is empty."),
        // Keep going: every search will report the error and the user can retry
        CatalogStatus::Unavailable { reason } => {
            println!("[error] Cannot reach the catalog: {reason}");
        }
    }

    console::run_console(&state)
        .await
        .context("terminal I/O failed")
}

pub fn run() -> anyhow::Result<()> {
    init_logging();
    let config = AppConfig::from_env().context("invalid configuration")?;
    log::info!(
        "Starting with table {} in {} mode",
        config.table,
        config.search_mode
    );

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?
        .block_on(start(config))
}
