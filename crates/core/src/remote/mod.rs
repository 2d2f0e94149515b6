//! Remote catalog access.
//!
//! Pure request/response against the hosted video catalog: the index of
//! entries, per-video detail records, and the binary/thumbnail fetches
//! they point at. No caching and no retries happen at this layer.

mod http;
mod types;

pub use http::HttpCatalogClient;
pub use types::IndexEntry;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use thiserror::Error;

use crate::library::VideoDetail;

/// A stream of body chunks from a binary content fetch.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, RemoteError>> + Send>>;

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed (connection, timeout, body transfer).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Response body did not match the expected shape.
    ///
    /// A missing required field fails the whole fetch; there is no partial
    /// parse.
    #[error("Malformed response from {url}: {message}")]
    Malformed { url: String, message: String },
}

/// Client for the remote video catalog.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Fetches the catalog index.
    ///
    /// Only the single supported category is extracted; any other category
    /// present in the response is ignored.
    async fn fetch_index(&self) -> Result<Vec<IndexEntry>, RemoteError>;

    /// Fetches the detail record behind an entry's `info_url`.
    async fn fetch_detail(&self, info_url: &str) -> Result<VideoDetail, RemoteError>;

    /// Starts a binary content download from an absolute URL.
    async fn fetch_video(&self, video_url: &str) -> Result<ByteStream, RemoteError>;

    /// Fetches raw thumbnail bytes from an absolute URL.
    async fn fetch_thumbnail(&self, thumbnail_url: &str) -> Result<Vec<u8>, RemoteError>;
}
