//! Public types for remote catalog responses.

use serde::{Deserialize, Serialize};

use crate::library::VideoEntry;

/// One entry of the remote catalog index, before local cache annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Globally unique identifier within the catalog.
    pub video_id: String,
    /// Display title.
    pub title: String,
    /// Absolute URL of the thumbnail image.
    pub thumbnail_url: String,
    /// Path of the detail record, relative to the catalog base URL.
    pub info_url: String,
}

impl From<VideoEntry> for IndexEntry {
    fn from(e: VideoEntry) -> Self {
        Self {
            video_id: e.video_id,
            title: e.title,
            thumbnail_url: e.thumbnail_url,
            info_url: e.info_url,
        }
    }
}
