use std::sync::Arc;

use anyhow::Context;
use media::storage::FilesystemAssetStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gateway::config::AppConfig;
use gateway::database::init_db;
use gateway::records::DbVideoStore;
use gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let assets = FilesystemAssetStore::new(config.storage.assets_root.clone())
        .await
        .with_context(|| {
            format!(
                "Failed to open assets directory {}",
                config.storage.assets_root.display()
            )
        })?;
    info!(root = %assets.root().display(), "Asset store ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, Arc::new(DbVideoStore::new(db)), Arc::new(assets));
    info!(public_origin = %state.urls.origin(), "Serving assets");

    let app = gateway::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
