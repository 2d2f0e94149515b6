use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidvault_core::{
    load_config, validate_config, FsContentStore, HttpCatalogClient, RemoteCatalog, SnapshotStore,
    SyncEngine, ThumbnailCache,
};

use vidvault_server::api::create_router;
use vidvault_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("VIDVAULT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration; a missing file means defaults + env overrides.
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config file at {:?}, using defaults", config_path);
        vidvault_core::Config::default()
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Catalog endpoint: {}/{}", config.remote.base_url, config.remote.deployment);
    info!("Data directory: {:?}", config.storage.data_dir);

    // Build the engine and its collaborators. One engine instance serves
    // the whole process.
    let remote: Arc<dyn RemoteCatalog> = Arc::new(
        HttpCatalogClient::new(&config.remote).context("Failed to create catalog client")?,
    );

    let content = FsContentStore::new(&config.storage.data_dir)
        .context("Failed to open content store")?;
    let snapshots = SnapshotStore::new(&config.storage.data_dir);

    let engine = Arc::new(SyncEngine::new(
        Arc::clone(&remote),
        content.clone(),
        snapshots,
        config.sync.clone(),
    ));
    let thumbnails = Arc::new(ThumbnailCache::new(Arc::clone(&remote), content));

    info!("Sync engine initialized");

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), engine, thumbnails));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
