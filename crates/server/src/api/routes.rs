use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, thumbnails, videos};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog
        .route("/videos", get(videos::list_videos))
        .route("/videos/downloaded", get(videos::list_downloaded))
        // Sync
        .route("/videos/sync", post(videos::sync_all))
        .route("/videos/{id}/sync", post(videos::sync_one))
        // Content
        .route("/videos/{id}/file", get(videos::get_video_file))
        .route("/videos/{id}/thumbnail", get(thumbnails::get_thumbnail))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(super::middleware::track_requests))
        .layer(TraceLayer::new_for_http())
}
