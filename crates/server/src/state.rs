use std::sync::Arc;

use vidvault_core::{Config, SanitizedConfig, SyncEngine, ThumbnailCache};

/// Shared application state
pub struct AppState {
    config: Config,
    engine: Arc<SyncEngine>,
    thumbnails: Arc<ThumbnailCache>,
}

impl AppState {
    pub fn new(config: Config, engine: Arc<SyncEngine>, thumbnails: Arc<ThumbnailCache>) -> Self {
        Self {
            config,
            engine,
            thumbnails,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn thumbnails(&self) -> &ThumbnailCache {
        &self.thumbnails
    }
}
