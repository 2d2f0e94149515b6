//! Thumbnail endpoint.

use std::io::Cursor;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::ApiError;
use crate::state::AppState;

/// Header carrying the "binary not cached yet" signal; clients apply their
/// own pending treatment (the original UI desaturates the image).
pub const PENDING_HEADER: &str = "x-vidvault-pending";

/// `GET /videos/{id}/thumbnail`: the entry's thumbnail as PNG.
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let catalog = state.engine().list_catalog(false).await?;
    let entry = catalog
        .entry(&id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown video '{}'", id)))?;

    let thumbnail = state.thumbnails().get(entry).await?;

    let mut png = Cursor::new(Vec::new());
    thumbnail
        .image
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| ApiError::Internal(format!("thumbnail encoding failed: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE.as_str(), "image/png"),
            (PENDING_HEADER, if thumbnail.pending { "true" } else { "false" }),
        ],
        png.into_inner(),
    )
        .into_response())
}
