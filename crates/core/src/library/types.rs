//! Value types for the video catalog.

use serde::{Deserialize, Serialize};

/// One catalog entry: the metadata needed to display a video and to fetch
/// the rest of it.
///
/// `cached_locally` is derived state. It is serialized (as `isDownloaded`)
/// so the persisted snapshot matches the catalog shape, but readers must
/// recompute it from the content store; the stored value ages as soon as a
/// download completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    /// Globally unique identifier within the catalog.
    pub video_id: String,
    /// Display title.
    pub title: String,
    /// Absolute URL of the thumbnail image.
    pub thumbnail_url: String,
    /// Path of the detail record, resolved against the catalog base URL.
    pub info_url: String,
    /// Whether the binary content is present in the local content store.
    #[serde(rename = "isDownloaded")]
    pub cached_locally: bool,
}

/// Extended per-video metadata, fetched lazily via the entry's `info_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    /// Category label.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Absolute URL of the binary content.
    pub video_url: String,
}

/// An entry paired with its detail record. Exists only transiently inside
/// the download pipeline.
#[derive(Debug, Clone)]
pub struct ResolvedVideo {
    pub entry: VideoEntry,
    pub detail: VideoDetail,
}

/// The full catalog: an ordered list of entries plus the category count,
/// which must always be 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCatalog {
    /// Always 1. Kept explicit so snapshots and API responses carry the
    /// same shape as the remote index.
    pub num_categories: usize,
    /// Entries of the single supported category.
    pub youtube: Vec<VideoEntry>,
}

impl VideoCatalog {
    /// Builds a catalog from the single category's entries.
    pub fn new(youtube: Vec<VideoEntry>) -> Self {
        Self {
            num_categories: 1,
            youtube,
        }
    }

    /// Panics unless the catalog carries exactly one category.
    ///
    /// A violation is a programming error, not a runtime condition to
    /// recover from; callers must invoke this before doing any I/O on the
    /// catalog's entries.
    pub fn assert_single_category(&self) {
        assert_eq!(
            self.num_categories, 1,
            "catalog must carry exactly one category, got {}",
            self.num_categories
        );
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.youtube.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.youtube.is_empty()
    }

    /// Entries whose binary content is present locally.
    pub fn downloaded(&self) -> Vec<VideoEntry> {
        self.youtube
            .iter()
            .filter(|e| e.cached_locally)
            .cloned()
            .collect()
    }

    /// Looks up an entry by identifier.
    pub fn entry(&self, video_id: &str) -> Option<&VideoEntry> {
        self.youtube.iter().find(|e| e.video_id == video_id)
    }
}
