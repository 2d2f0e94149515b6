//! Thumbnail cache implementation.

use std::sync::Arc;

use image::DynamicImage;
use thiserror::Error;
use tracing::{debug, warn};

use crate::content_store::{ContentStoreError, FsContentStore};
use crate::library::VideoEntry;
use crate::metrics;
use crate::remote::{RemoteCatalog, RemoteError};

/// Errors that can occur while resolving a thumbnail.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// Thumbnail fetch failed.
    #[error("Thumbnail fetch failed: {0}")]
    Remote(#[from] RemoteError),

    /// A cached sidecar could not be read back.
    #[error("Thumbnail read failed: {0}")]
    Store(#[from] ContentStoreError),

    /// The bytes did not decode as an image.
    #[error("Thumbnail for '{video_id}' is not a decodable image")]
    InvalidImage {
        video_id: String,
        #[source]
        source: image::ImageError,
    },
}

/// A resolved thumbnail.
#[derive(Debug)]
pub struct Thumbnail {
    /// The decoded image.
    pub image: DynamicImage,
    /// True when the entry's binary content is not yet in the content
    /// store. Presentation uses this to apply its "not yet available"
    /// treatment; the pixel transform itself happens outside the core.
    pub pending: bool,
}

/// Lazily-populated image cache layered on the content store.
pub struct ThumbnailCache {
    remote: Arc<dyn RemoteCatalog>,
    content: FsContentStore,
}

impl ThumbnailCache {
    /// Creates a cache reading and writing sidecars in `content`.
    pub fn new(remote: Arc<dyn RemoteCatalog>, content: FsContentStore) -> Self {
        Self { remote, content }
    }

    /// Returns the entry's thumbnail, fetching and caching it on first use.
    ///
    /// A present sidecar is served without any network call and without a
    /// staleness check. On a miss the raw bytes are fetched, validated by
    /// decoding, and written back as a sidecar; a failed sidecar write is
    /// logged and the decoded image still returned.
    pub async fn get(&self, entry: &VideoEntry) -> Result<Thumbnail, ThumbnailError> {
        let video_id = &entry.video_id;

        let (bytes, from_cache) = if self.content.has_thumbnail(video_id) {
            metrics::THUMBNAIL_FETCHES.with_label_values(&["cache"]).inc();
            (self.content.read_thumbnail(video_id).await?, true)
        } else {
            metrics::THUMBNAIL_FETCHES
                .with_label_values(&["remote"])
                .inc();
            (self.remote.fetch_thumbnail(&entry.thumbnail_url).await?, false)
        };

        let image =
            image::load_from_memory(&bytes).map_err(|e| ThumbnailError::InvalidImage {
                video_id: video_id.clone(),
                source: e,
            })?;

        if !from_cache {
            debug!(video_id = %video_id, bytes = bytes.len(), "Caching thumbnail sidecar");
            if let Err(e) = self.content.write_thumbnail(video_id, &bytes).await {
                warn!(video_id = %video_id, error = %e, "Failed to cache thumbnail");
            }
        }

        // Recomputed at return time: the same download may have completed
        // since the entry was annotated.
        let pending = !self.content.has_video(video_id);

        Ok(Thumbnail { image, pending })
    }
}
