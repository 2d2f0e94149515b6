//! Catalog snapshot file store.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use thiserror::Error;

use crate::library::VideoCatalog;

/// Well-known snapshot file name, matching the catalog shape it contains.
pub const SNAPSHOT_FILE: &str = "videoCategories.json";

/// Errors that can occur while saving a snapshot.
///
/// Loads never produce an error; see [`SnapshotStore::load`].
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Catalog could not be serialized.
    #[error("Failed to serialize catalog snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Snapshot file could not be written.
    #[error("Failed to write catalog snapshot: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Filesystem store for the persisted catalog snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store writing to `<data_dir>/videoCategories.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    /// Snapshot file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the full catalog, replacing any previous snapshot.
    ///
    /// Failure is reported to the caller, who decides whether to log and
    /// carry on; snapshot persistence must never break the primary flow.
    pub async fn save(&self, catalog: &VideoCatalog) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec(catalog)?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| SnapshotError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        debug!(path = %self.path.display(), entries = catalog.len(), "Catalog snapshot saved");
        Ok(())
    }

    /// Returns the persisted catalog, or `None` if the file is missing,
    /// unreadable, or does not deserialize cleanly.
    ///
    /// Callers must treat `None` as "fall back to a remote fetch"; the
    /// stale-but-available snapshot is preferred over a hard failure, and a
    /// corrupt one is simply ignored.
    pub async fn load(&self) -> Option<VideoCatalog> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No readable catalog snapshot");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Catalog snapshot did not parse");
                None
            }
        }
    }
}
