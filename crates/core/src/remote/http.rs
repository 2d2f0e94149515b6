//! HTTP client for the hosted video catalog.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::library::{VideoDetail, CATEGORY};

use super::types::IndexEntry;
use super::{ByteStream, RemoteCatalog, RemoteError};

/// Catalog client backed by reqwest.
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    deployment: String,
}

impl HttpCatalogClient {
    /// Creates a client from the remote configuration.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            deployment: config.deployment.clone(),
        })
    }

    async fn get_checked(&self, url: &str) -> Result<reqwest::Response, RemoteError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalogClient {
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>, RemoteError> {
        let url = format!("{}/{}/videos", self.base_url, self.deployment);

        debug!(url = %url, "Fetching catalog index");

        let response = self.get_checked(&url).await?;
        let mut index: WireIndexResponse =
            response.json().await.map_err(|e| RemoteError::Malformed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        // Only the single supported category is consumed; anything else in
        // the response is dropped.
        let entries = index
            .videos
            .remove(CATEGORY)
            .ok_or_else(|| RemoteError::Malformed {
                url: url.clone(),
                message: format!("index has no '{}' category", CATEGORY),
            })?;

        debug!(count = entries.len(), "Catalog index fetched");
        Ok(entries.into_iter().map(IndexEntry::from).collect())
    }

    async fn fetch_detail(&self, info_url: &str) -> Result<VideoDetail, RemoteError> {
        let url = format!("{}{}", self.base_url, info_url);

        debug!(url = %url, "Fetching video detail");

        let response = self.get_checked(&url).await?;
        let detail: WireDetailResponse =
            response.json().await.map_err(|e| RemoteError::Malformed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Ok(detail.video.into())
    }

    async fn fetch_video(&self, video_url: &str) -> Result<ByteStream, RemoteError> {
        debug!(url = %video_url, "Starting video download");

        let response = self.get_checked(video_url).await?;
        let stream = response.bytes_stream().map_err(RemoteError::from);
        Ok(stream.boxed())
    }

    async fn fetch_thumbnail(&self, thumbnail_url: &str) -> Result<Vec<u8>, RemoteError> {
        debug!(url = %thumbnail_url, "Fetching thumbnail");

        let response = self.get_checked(thumbnail_url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

// ============================================================================
// Wire types (private)
// ============================================================================

/// Index response: a nested category map, deserialized as a plain map so
/// unknown categories are tolerated, then reduced to the one we serve.
#[derive(Debug, Deserialize)]
struct WireIndexResponse {
    videos: HashMap<String, Vec<WireIndexEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIndexEntry {
    video_id: String,
    title: String,
    thumbnail_url: String,
    info_url: String,
}

#[derive(Debug, Deserialize)]
struct WireDetailResponse {
    video: WireDetail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDetail {
    category: String,
    description: String,
    video_url: String,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<WireIndexEntry> for IndexEntry {
    fn from(e: WireIndexEntry) -> Self {
        Self {
            video_id: e.video_id,
            title: e.title,
            thumbnail_url: e.thumbnail_url,
            info_url: e.info_url,
        }
    }
}

impl From<WireDetail> for VideoDetail {
    fn from(d: WireDetail) -> Self {
        Self {
            category: d.category,
            description: d.description,
            video_url: d.video_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_response_extracts_single_category() {
        let body = r#"{
            "videos": {
                "youtube": [
                    {
                        "videoId": "abc",
                        "title": "T",
                        "thumbnailUrl": "https://cdn.example.com/abc.jpg",
                        "infoUrl": "/dev/videos/abc"
                    }
                ],
                "vimeo": []
            }
        }"#;

        let mut parsed: WireIndexResponse = serde_json::from_str(body).unwrap();
        let entries = parsed.videos.remove(CATEGORY).unwrap();
        assert_eq!(entries.len(), 1);

        let entry: IndexEntry = entries.into_iter().next().unwrap().into();
        assert_eq!(entry.video_id, "abc");
        assert_eq!(entry.info_url, "/dev/videos/abc");
    }

    #[test]
    fn test_index_response_missing_category() {
        let body = r#"{"videos": {"vimeo": []}}"#;
        let mut parsed: WireIndexResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.videos.remove(CATEGORY).is_none());
    }

    #[test]
    fn test_index_entry_missing_field_fails_parse() {
        // No partial parse: an entry without a videoId sinks the response.
        let body = r#"{
            "videos": {
                "youtube": [{"title": "T", "thumbnailUrl": "u", "infoUrl": "/i"}]
            }
        }"#;
        let parsed: Result<WireIndexResponse, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_detail_response_parses() {
        let body = r#"{
            "video": {
                "category": "youtube",
                "description": "A video",
                "videoUrl": "https://videos.example.com/abc.mp4"
            }
        }"#;

        let parsed: WireDetailResponse = serde_json::from_str(body).unwrap();
        let detail: VideoDetail = parsed.video.into();
        assert_eq!(detail.video_url, "https://videos.example.com/abc.mp4");
        assert_eq!(detail.category, "youtube");
    }

    #[test]
    fn test_detail_response_missing_field_fails_parse() {
        let body = r#"{"video": {"category": "youtube", "description": "d"}}"#;
        let parsed: Result<WireDetailResponse, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }
}
