//! On-demand thumbnail cache.
//!
//! Thumbnails are fetched lazily the first time an entry is displayed and
//! cached as sidecar files next to the video content. A cached thumbnail
//! is never refreshed.

mod cache;

pub use cache::{Thumbnail, ThumbnailCache, ThumbnailError};
