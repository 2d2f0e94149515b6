//! Filesystem content store implementation.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use super::error::ContentStoreError;

/// Extension of stored video content files.
const VIDEO_EXT: &str = "mp4";
/// Extension of thumbnail sidecar files.
const THUMBNAIL_EXT: &str = "thumbnail";
/// Suffix for in-progress staging files.
const STAGING_SUFFIX: &str = "part";

/// Filesystem-backed blob store keyed by video identifier.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ContentStoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| ContentStoreError::RootCreationFailed {
            path: root.clone(),
            source: e,
        })?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical path of a video's binary content.
    pub fn video_path(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", video_id, VIDEO_EXT))
    }

    /// Canonical path of a video's thumbnail sidecar.
    pub fn thumbnail_path(&self, video_id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", video_id, THUMBNAIL_EXT))
    }

    /// Whether the binary content for `video_id` is present.
    ///
    /// File presence only; no TTL, no integrity check.
    pub fn has_video(&self, video_id: &str) -> bool {
        self.video_path(video_id).is_file()
    }

    /// Whether a thumbnail sidecar for `video_id` is present.
    pub fn has_thumbnail(&self, video_id: &str) -> bool {
        self.thumbnail_path(video_id).is_file()
    }

    /// Reads a thumbnail sidecar back.
    pub async fn read_thumbnail(&self, video_id: &str) -> Result<Vec<u8>, ContentStoreError> {
        let path = self.thumbnail_path(video_id);
        fs::read(&path)
            .await
            .map_err(|e| ContentStoreError::ReadFailed { path, source: e })
    }

    /// Writes thumbnail bytes, atomically replacing any existing sidecar.
    pub async fn write_thumbnail(
        &self,
        video_id: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, ContentStoreError> {
        let path = self.thumbnail_path(video_id);
        let staging = staging_path(&path);

        fs::write(&staging, bytes)
            .await
            .map_err(|e| ContentStoreError::WriteFailed {
                path: staging.clone(),
                source: e,
            })?;
        fs::rename(&staging, &path)
            .await
            .map_err(|e| ContentStoreError::CommitFailed {
                path: path.clone(),
                source: e,
            })?;

        debug!(video_id = %video_id, path = %path.display(), "Thumbnail stored");
        Ok(path)
    }

    /// Opens a staging file for a streamed video download.
    ///
    /// Chunks are buffered into `<id>.mp4.part`; nothing lands at the
    /// canonical path until [`StagingVideo::commit`] renames it there.
    pub async fn begin_video(&self, video_id: &str) -> Result<StagingVideo, ContentStoreError> {
        let destination = self.video_path(video_id);
        let staging = staging_path(&destination);

        let file = File::create(&staging)
            .await
            .map_err(|e| ContentStoreError::WriteFailed {
                path: staging.clone(),
                source: e,
            })?;

        Ok(StagingVideo {
            writer: BufWriter::new(file),
            staging,
            destination,
        })
    }
}

/// An in-progress video download.
///
/// Dropping without committing leaves only the `.part` file behind; the
/// canonical path is untouched.
#[derive(Debug)]
pub struct StagingVideo {
    writer: BufWriter<File>,
    staging: PathBuf,
    destination: PathBuf,
}

impl StagingVideo {
    /// Appends a chunk of the download.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), ContentStoreError> {
        self.writer
            .write_all(chunk)
            .await
            .map_err(|e| ContentStoreError::WriteFailed {
                path: self.staging.clone(),
                source: e,
            })
    }

    /// Flushes and renames the staging file over the canonical path,
    /// replacing any previous object for this id.
    pub async fn commit(mut self) -> Result<PathBuf, ContentStoreError> {
        self.writer
            .flush()
            .await
            .map_err(|e| ContentStoreError::WriteFailed {
                path: self.staging.clone(),
                source: e,
            })?;

        fs::rename(&self.staging, &self.destination)
            .await
            .map_err(|e| ContentStoreError::CommitFailed {
                path: self.destination.clone(),
                source: e,
            })?;

        Ok(self.destination)
    }

    /// Removes the staging file after a failed download. Best effort.
    pub async fn discard(self) {
        if let Err(e) = fs::remove_file(&self.staging).await {
            debug!(path = %self.staging.display(), error = %e, "Failed to remove staging file");
        }
    }
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.push('.');
    name.push_str(STAGING_SUFFIX);
    destination.with_file_name(name)
}
