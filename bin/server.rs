// Project Store - Web Server

use anyhow::{Context, Result};
use project_store::{api, telemetry, Config, Database};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let config = Config::load(Path::new(project_store::config::CONFIG_FILE))?;

    let db = match &config.database_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "opening database");
            Database::open(path)?
        }
        None => {
            tracing::warn!("no database_path configured; data lives in memory only");
            Database::open_in_memory()?
        }
    };

    let app = api::build_app(db);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address()))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        version = project_store::VERSION,
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
