//! HourSnake Service - HTTP API for the hourly Snake arcade backend.
//!
//! This is the main entry point for the hoursnake service.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hoursnake_service::{create_router, AppState, RewardCycle, ServiceConfig};
use hoursnake_store::RocksStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hoursnake=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HourSnake Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        default_stars = config.default_stars,
        entry_fee = config.entry_fee,
        reward_poll_secs = config.reward_poll_secs,
        "Service configuration loaded"
    );

    // Initialize RocksDB store
    tracing::info!(path = %config.data_dir, "Opening RocksDB store");
    let store = Arc::new(RocksStore::open(&config.data_dir)?);

    // Spawn the hourly reward cycle
    let cycle = RewardCycle::new(Arc::clone(&store), config.rewards);
    tokio::spawn(cycle.run(Duration::from_secs(config.reward_poll_secs)));
    tracing::info!("Reward cycle scheduled");

    // Build app state and router
    let state = AppState::new(store, config.clone());
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
