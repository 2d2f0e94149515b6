//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock implementation of the remote catalog,
//! allowing the sync engine and thumbnail cache to be exercised end to end
//! without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use vidvault_core::testing::{fixtures, MockRemoteCatalog};
//!
//! let remote = Arc::new(MockRemoteCatalog::new());
//! remote.add_video("abc", "First video").await;
//! remote.fail_url(&fixtures::video_url("abc")).await;
//!
//! // Use in a SyncEngine, then assert on what was requested:
//! let log = remote.request_log().await;
//! assert_eq!(log.index_fetches, 1);
//! ```

mod mock_remote_catalog;

pub use mock_remote_catalog::{MockRemoteCatalog, RequestLog};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::library::{VideoDetail, VideoEntry, CATEGORY};
    use crate::remote::IndexEntry;

    /// Thumbnail URL used by mock entries.
    pub fn thumbnail_url(video_id: &str) -> String {
        format!("https://cdn.example.com/{}.jpg", video_id)
    }

    /// Detail record path used by mock entries.
    pub fn info_url(video_id: &str) -> String {
        format!("/dev/videos/{}", video_id)
    }

    /// Binary content URL used by mock details.
    pub fn video_url(video_id: &str) -> String {
        format!("https://videos.example.com/{}.mp4", video_id)
    }

    /// Create a test index entry with the fixture URL conventions.
    pub fn index_entry(video_id: &str, title: &str) -> IndexEntry {
        IndexEntry {
            video_id: video_id.to_string(),
            title: title.to_string(),
            thumbnail_url: thumbnail_url(video_id),
            info_url: info_url(video_id),
        }
    }

    /// Create a test catalog entry.
    pub fn entry(video_id: &str, title: &str, cached_locally: bool) -> VideoEntry {
        VideoEntry {
            video_id: video_id.to_string(),
            title: title.to_string(),
            thumbnail_url: thumbnail_url(video_id),
            info_url: info_url(video_id),
            cached_locally,
        }
    }

    /// Create a test detail record pointing at the fixture video URL.
    pub fn detail(video_id: &str) -> VideoDetail {
        VideoDetail {
            category: CATEGORY.to_string(),
            description: format!("Description of {}", video_id),
            video_url: video_url(video_id),
        }
    }

    /// Encode a small valid PNG for thumbnail tests.
    pub fn thumbnail_png() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([120, 40, 200, 255]),
        ));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .expect("in-memory png encoding");
        buf.into_inner()
    }
}
