//! Mock remote catalog for testing.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use tokio::sync::RwLock;

use crate::library::VideoDetail;
use crate::remote::{ByteStream, IndexEntry, RemoteCatalog, RemoteError};

use super::fixtures;

/// Every request the mock has served, for test assertions.
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    /// Number of index fetches.
    pub index_fetches: usize,
    /// URLs of detail fetches, in request order.
    pub detail_fetches: Vec<String>,
    /// URLs of video downloads, in request order.
    pub video_fetches: Vec<String>,
    /// URLs of thumbnail fetches, in request order.
    pub thumbnail_fetches: Vec<String>,
}

impl RequestLog {
    /// Total number of requests of any kind.
    pub fn total(&self) -> usize {
        self.index_fetches
            + self.detail_fetches.len()
            + self.video_fetches.len()
            + self.thumbnail_fetches.len()
    }
}

/// Mock implementation of the [`RemoteCatalog`] trait.
///
/// Provides controllable behavior for testing:
/// - Configurable index entries, detail records, video and thumbnail bytes
/// - Per-URL injected failures
/// - A request log for idempotence and single-fetch assertions
pub struct MockRemoteCatalog {
    /// Index entries returned by `fetch_index`.
    index: RwLock<Vec<IndexEntry>>,
    /// Detail records keyed by info URL.
    details: RwLock<HashMap<String, VideoDetail>>,
    /// Video bodies keyed by video URL.
    videos: RwLock<HashMap<String, Vec<u8>>>,
    /// Thumbnail bytes keyed by thumbnail URL.
    thumbnails: RwLock<HashMap<String, Vec<u8>>>,
    /// When true, `fetch_index` fails with a 503.
    fail_index: RwLock<bool>,
    /// URLs whose fetches fail with a 500.
    failing_urls: RwLock<HashSet<String>>,
    /// Recorded requests.
    log: RwLock<RequestLog>,
}

impl Default for MockRemoteCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRemoteCatalog {
    /// Create a new mock with an empty catalog.
    pub fn new() -> Self {
        Self {
            index: RwLock::new(Vec::new()),
            details: RwLock::new(HashMap::new()),
            videos: RwLock::new(HashMap::new()),
            thumbnails: RwLock::new(HashMap::new()),
            fail_index: RwLock::new(false),
            failing_urls: RwLock::new(HashSet::new()),
            log: RwLock::new(RequestLog::default()),
        }
    }

    /// Add a fully wired video: index entry, detail record, video body and
    /// thumbnail bytes, all under the fixture URL conventions.
    pub async fn add_video(&self, video_id: &str, title: &str) {
        self.index
            .write()
            .await
            .push(fixtures::index_entry(video_id, title));
        self.details
            .write()
            .await
            .insert(fixtures::info_url(video_id), fixtures::detail(video_id));
        self.videos.write().await.insert(
            fixtures::video_url(video_id),
            format!("video bytes of {}", video_id).into_bytes(),
        );
        self.thumbnails
            .write()
            .await
            .insert(fixtures::thumbnail_url(video_id), fixtures::thumbnail_png());
    }

    /// Replace the thumbnail bytes served for a video.
    pub async fn set_thumbnail(&self, video_id: &str, bytes: Vec<u8>) {
        self.thumbnails
            .write()
            .await
            .insert(fixtures::thumbnail_url(video_id), bytes);
    }

    /// Make `fetch_index` fail until cleared.
    pub async fn set_index_failure(&self, fail: bool) {
        *self.fail_index.write().await = fail;
    }

    /// Make every fetch of `url` fail with a 500.
    pub async fn fail_url(&self, url: &str) {
        self.failing_urls.write().await.insert(url.to_string());
    }

    /// Clear all injected per-URL failures.
    pub async fn clear_failures(&self) {
        self.failing_urls.write().await.clear();
    }

    /// Snapshot of everything requested so far.
    pub async fn request_log(&self) -> RequestLog {
        self.log.read().await.clone()
    }

    /// Clear the request log.
    pub async fn reset_log(&self) {
        *self.log.write().await = RequestLog::default();
    }

    async fn check_url(&self, url: &str) -> Result<(), RemoteError> {
        if self.failing_urls.read().await.contains(url) {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteCatalog for MockRemoteCatalog {
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>, RemoteError> {
        self.log.write().await.index_fetches += 1;

        if *self.fail_index.read().await {
            return Err(RemoteError::Status {
                url: "mock:/index".to_string(),
                status: 503,
            });
        }

        Ok(self.index.read().await.clone())
    }

    async fn fetch_detail(&self, info_url: &str) -> Result<VideoDetail, RemoteError> {
        self.log
            .write()
            .await
            .detail_fetches
            .push(info_url.to_string());
        self.check_url(info_url).await?;

        self.details
            .read()
            .await
            .get(info_url)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                url: info_url.to_string(),
                status: 404,
            })
    }

    async fn fetch_video(&self, video_url: &str) -> Result<ByteStream, RemoteError> {
        self.log
            .write()
            .await
            .video_fetches
            .push(video_url.to_string());
        self.check_url(video_url).await?;

        let bytes = self
            .videos
            .read()
            .await
            .get(video_url)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                url: video_url.to_string(),
                status: 404,
            })?;

        // Served as two chunks so consumers exercise their streaming path.
        let mid = bytes.len() / 2;
        let chunks = vec![
            Ok(Bytes::copy_from_slice(&bytes[..mid])),
            Ok(Bytes::copy_from_slice(&bytes[mid..])),
        ];
        Ok(stream::iter(chunks).boxed())
    }

    async fn fetch_thumbnail(&self, thumbnail_url: &str) -> Result<Vec<u8>, RemoteError> {
        self.log
            .write()
            .await
            .thumbnail_fetches
            .push(thumbnail_url.to_string());
        self.check_url(thumbnail_url).await?;

        self.thumbnails
            .read()
            .await
            .get(thumbnail_url)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                url: thumbnail_url.to_string(),
                status: 404,
            })
    }
}
