pub mod commands;
pub mod modules;
mod schema;
pub mod shared;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task;

use commands::{build_router, AppState};
use shared::utils::init_logger;
use shared::{AppConfig, Database};

/// Loads configuration, prepares the database and serves HTTP until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    let config = Arc::new(AppConfig::load().context("Failed to load configuration")?);
    init_logger(&config);

    let database = Arc::new(Database::new(&config.database));

    // A failed migration leaves the service up; /health reports the store.
    let migrator = Arc::clone(&database);
    task::spawn_blocking(move || migrator.migrate_or_warn())
        .await
        .context("Migration task panicked")?;

    let state = AppState::new(database, Arc::clone(&config));
    let app = build_router(state);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
