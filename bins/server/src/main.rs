//! Performance tracker API server
//!
//! Main entry point for the tracker backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracker_api::{AppState, create_router};
use tracker_shared::AppConfig;
use tracker_store::{JsonBinStore, SheetsConfigProvider, TrackerRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Build collaborator clients
    let store = JsonBinStore::new(&config.jsonbin)?;
    let provider = SheetsConfigProvider::new(&config.sheets)?;
    info!(
        jsonbin = %config.jsonbin.base_url,
        sheets = %config.sheets.base_url,
        bin_id = %config.jsonbin.bin_id,
        "Collaborators configured"
    );

    // Load the working state. Startup fails rather than serve a partial view
    // that a later save would write back over the stored document.
    let repository = TrackerRepository::new(
        Arc::new(store),
        Arc::new(provider),
        config.jsonbin.bin_id.clone(),
    );
    let initial = repository
        .load_state()
        .await
        .context("Failed to load initial state")?;

    // Create application state and router
    let state = AppState::new(repository, initial);
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
