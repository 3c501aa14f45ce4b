//! Sitebook API Server
//!
//! Main entry point for the Sitebook backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitebook_api::{AppState, create_router};
use sitebook_core::storage::{StorageConfig, StorageProvider, StorageService};
use sitebook_db::connect;
use sitebook_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitebook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create storage service
    let provider = match config.storage.backend.as_str() {
        "s3" => StorageProvider::s3(
            config.storage.endpoint.clone().unwrap_or_default(),
            config.storage.root.clone(),
            config.storage.region.clone().unwrap_or_else(|| "auto".to_string()),
        ),
        _ => StorageProvider::local_fs(config.storage.root.clone()),
    };
    let storage = StorageService::from_config(StorageConfig::new(provider))
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {e}"))?;
    info!(provider = storage.provider_name(), "Storage configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
