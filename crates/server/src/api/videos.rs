//! Catalog and sync endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tower::util::ServiceExt;
use tower_http::services::ServeFile;

use vidvault_core::{SyncOutcome, SyncReport, SyncStatus, VideoCatalog};

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Force a remote refresh instead of serving the persisted snapshot.
    #[serde(default)]
    pub refresh: bool,
}

/// Wire form of a [`SyncOutcome`].
#[derive(Debug, Serialize)]
pub struct SyncOutcomeResponse {
    pub video_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SyncOutcome> for SyncOutcomeResponse {
    fn from(outcome: &SyncOutcome) -> Self {
        let (status, path, error) = match &outcome.status {
            SyncStatus::Downloaded { path } => (
                "downloaded",
                Some(path.display().to_string()),
                None,
            ),
            SyncStatus::AlreadyCached => ("already_cached", None, None),
            SyncStatus::InFlight => ("in_flight", None, None),
            SyncStatus::Failed { error } => ("failed", None, Some(error.to_string())),
        };
        Self {
            video_id: outcome.video_id.clone(),
            status: status.to_string(),
            path,
            error,
        }
    }
}

/// Wire form of a [`SyncReport`].
#[derive(Debug, Serialize)]
pub struct SyncReportResponse {
    pub downloaded: usize,
    pub already_cached: usize,
    pub in_flight: usize,
    pub failed: usize,
    pub complete: bool,
    pub outcomes: Vec<SyncOutcomeResponse>,
}

impl From<&SyncReport> for SyncReportResponse {
    fn from(report: &SyncReport) -> Self {
        Self {
            downloaded: report.downloaded(),
            already_cached: report.already_cached(),
            in_flight: report.in_flight(),
            failed: report.failed(),
            complete: report.is_complete(),
            outcomes: report.outcomes.iter().map(Into::into).collect(),
        }
    }
}

/// `GET /videos`: the catalog, annotated with local cache status.
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<VideoCatalog>, ApiError> {
    let catalog = state.engine().list_catalog(params.refresh).await?;
    Ok(Json(catalog))
}

/// `GET /videos/downloaded`: only the entries available offline.
pub async fn list_downloaded(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VideoCatalog>, ApiError> {
    let catalog = state.engine().list_catalog(false).await?;
    Ok(Json(VideoCatalog::new(catalog.downloaded())))
}

/// `POST /videos/sync`: refresh the catalog and sync everything missing.
pub async fn sync_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SyncReportResponse>, ApiError> {
    let catalog = state.engine().list_catalog(true).await?;
    let report = state.engine().sync_catalog(&catalog).await;
    Ok(Json(SyncReportResponse::from(&report)))
}

/// `POST /videos/{id}/sync`: sync a single entry.
pub async fn sync_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SyncOutcomeResponse>, ApiError> {
    let catalog = state.engine().list_catalog(false).await?;
    let entry = catalog
        .entry(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("unknown video '{}'", id)))?;

    let report = state.engine().sync_entries(&[entry]).await;
    let outcome = report
        .outcome(&id)
        .ok_or_else(|| ApiError::Internal("sync produced no outcome".to_string()))?;
    Ok(Json(SyncOutcomeResponse::from(outcome)))
}

/// `GET /videos/{id}/file`: serve the cached binary content.
pub async fn get_video_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let store = state.engine().content();
    if !store.has_video(&id) {
        return Err(ApiError::NotFound(format!("video '{}' is not cached", id)));
    }

    let response = match ServeFile::new(store.video_path(&id)).oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };
    Ok(response.map(Body::new))
}
