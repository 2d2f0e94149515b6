//! Sync engine implementation.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use futures::{stream, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::content_store::{FsContentStore, StagingVideo};
use crate::library::{ResolvedVideo, VideoCatalog, VideoEntry};
use crate::metadata_store::SnapshotStore;
use crate::metrics;
use crate::remote::{ByteStream, IndexEntry, RemoteCatalog};

use super::types::{SyncError, SyncOutcome, SyncReport, SyncStatus};

/// The synchronization engine.
///
/// Owns the content store, the snapshot store and the remote client;
/// consumers hold it behind an `Arc` and never touch the stores directly.
pub struct SyncEngine {
    remote: Arc<dyn RemoteCatalog>,
    content: FsContentStore,
    snapshots: SnapshotStore,
    config: SyncConfig,
    /// Ids with a download currently running, across all batches. An id
    /// claimed here is skipped by overlapping sync calls instead of being
    /// downloaded twice.
    in_flight: Mutex<HashSet<String>>,
}

impl SyncEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        remote: Arc<dyn RemoteCatalog>,
        content: FsContentStore,
        snapshots: SnapshotStore,
        config: SyncConfig,
    ) -> Self {
        Self {
            remote,
            content,
            snapshots,
            config,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// The underlying content store.
    pub fn content(&self) -> &FsContentStore {
        &self.content
    }

    /// Returns the catalog, preferring the persisted snapshot.
    ///
    /// With `refresh == false` a readable snapshot is served directly,
    /// with no network call, trading staleness for latency and offline
    /// availability. The `cached_locally` flags are recomputed from the
    /// content store either way, so they reflect downloads that completed
    /// after the snapshot was written.
    ///
    /// With `refresh == true`, or when no snapshot is available, the index
    /// is fetched remotely and the resulting catalog persisted. A failed
    /// persist only logs; a failed fetch with no snapshot to fall back on
    /// is the caller's error.
    pub async fn list_catalog(&self, refresh: bool) -> Result<VideoCatalog, SyncError> {
        if !refresh {
            if let Some(snapshot) = self.snapshots.load().await {
                metrics::SNAPSHOT_HITS.inc();
                debug!(entries = snapshot.len(), "Serving catalog from snapshot");
                // Stored isDownloaded flags are stale by definition; only
                // the entry metadata is taken from the snapshot.
                return Ok(self.annotate(snapshot.youtube.into_iter().map(IndexEntry::from)));
            }
        }

        let index = match self.remote.fetch_index().await {
            Ok(index) => {
                metrics::CATALOG_REFRESHES
                    .with_label_values(&["success"])
                    .inc();
                index
            }
            Err(e) => {
                metrics::CATALOG_REFRESHES
                    .with_label_values(&["error"])
                    .inc();
                return Err(e.into());
            }
        };

        let catalog = self.annotate(index);

        // Best-effort persistence: the fresh catalog is returned even if
        // the snapshot cannot be written.
        if let Err(e) = self.snapshots.save(&catalog).await {
            warn!(error = %e, "Failed to persist catalog snapshot");
        }

        info!(entries = catalog.len(), "Catalog refreshed from remote");
        Ok(catalog)
    }

    /// Syncs every entry of a catalog.
    ///
    /// Panics if the catalog violates the single-category invariant; the
    /// assert runs before any I/O.
    pub async fn sync_catalog(&self, catalog: &VideoCatalog) -> SyncReport {
        catalog.assert_single_category();
        self.sync_entries(&catalog.youtube).await
    }

    /// Syncs a set of entries, downloading whatever is not cached yet.
    ///
    /// Already-cached entries are skipped (a cached item is never
    /// re-downloaded by a routine sync); ids owned by an overlapping batch
    /// are skipped as in-flight. The remaining pipelines run concurrently,
    /// at most `max_parallel_downloads` at a time, and the batch always
    /// settles: every pipeline runs to success or failure, and the report
    /// carries one outcome per input entry. There are no retries here; a
    /// failed item stays uncached and is picked up again by any later sync
    /// that includes it.
    pub async fn sync_entries(&self, entries: &[VideoEntry]) -> SyncReport {
        let mut statuses: HashMap<usize, SyncStatus> = HashMap::new();
        let mut to_sync: Vec<(usize, VideoEntry)> = Vec::new();

        {
            let mut in_flight = self.in_flight.lock().await;
            for (idx, entry) in entries.iter().enumerate() {
                if self.content.has_video(&entry.video_id) {
                    statuses.insert(idx, SyncStatus::AlreadyCached);
                } else if !in_flight.insert(entry.video_id.clone()) {
                    debug!(video_id = %entry.video_id, "Download already in flight, skipping");
                    statuses.insert(idx, SyncStatus::InFlight);
                } else {
                    to_sync.push((idx, entry.clone()));
                }
            }
        }

        if !to_sync.is_empty() {
            info!(
                requested = entries.len(),
                missing = to_sync.len(),
                "Syncing videos"
            );
        }

        // Settle-all join: every pipeline reaches success or failure; one
        // bad item never aborts the progress of the others.
        let results: Vec<(usize, String, Result<PathBuf, SyncError>)> = stream::iter(to_sync)
            .map(|(idx, entry)| async move {
                let result = self.sync_one(&entry).await;
                (idx, entry.video_id, result)
            })
            .buffer_unordered(self.config.max_parallel_downloads)
            .collect()
            .await;

        {
            let mut in_flight = self.in_flight.lock().await;
            for (_, video_id, _) in &results {
                in_flight.remove(video_id);
            }
        }

        for (idx, video_id, result) in results {
            let status = match result {
                Ok(path) => {
                    debug!(video_id = %video_id, path = %path.display(), "Video synced");
                    SyncStatus::Downloaded { path }
                }
                Err(e) => {
                    warn!(video_id = %video_id, error = %e, "Video sync failed");
                    SyncStatus::Failed { error: e }
                }
            };
            statuses.insert(idx, status);
        }

        let outcomes = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| SyncOutcome {
                video_id: entry.video_id.clone(),
                status: statuses
                    .remove(&idx)
                    .expect("every entry receives an outcome"),
            })
            .collect();

        SyncReport { outcomes }
    }

    /// One entry's pipeline: fetch the detail record, then stream the
    /// binary into the content store.
    async fn sync_one(&self, entry: &VideoEntry) -> Result<PathBuf, SyncError> {
        let detail = self.remote.fetch_detail(&entry.info_url).await?;
        let resolved = ResolvedVideo {
            entry: entry.clone(),
            detail,
        };

        metrics::DOWNLOADS_STARTED.inc();
        let start = Instant::now();

        let result = self.download(&resolved).await;

        let elapsed = start.elapsed().as_secs_f64();
        match &result {
            Ok(_) => {
                metrics::DOWNLOADS_COMPLETED.inc();
                metrics::DOWNLOAD_DURATION
                    .with_label_values(&["success"])
                    .observe(elapsed);
            }
            Err(_) => {
                metrics::DOWNLOADS_FAILED.inc();
                metrics::DOWNLOAD_DURATION
                    .with_label_values(&["failed"])
                    .observe(elapsed);
            }
        }

        result
    }

    async fn download(&self, resolved: &ResolvedVideo) -> Result<PathBuf, SyncError> {
        let stream = self.remote.fetch_video(&resolved.detail.video_url).await?;
        let staging = self.content.begin_video(&resolved.entry.video_id).await?;
        drain_into(stream, staging).await
    }

    /// Builds catalog entries with `cached_locally` computed from the
    /// content store's current state.
    fn annotate(&self, entries: impl IntoIterator<Item = IndexEntry>) -> VideoCatalog {
        let annotated = entries
            .into_iter()
            .map(|e| {
                let cached_locally = self.content.has_video(&e.video_id);
                VideoEntry {
                    video_id: e.video_id,
                    title: e.title,
                    thumbnail_url: e.thumbnail_url,
                    info_url: e.info_url,
                    cached_locally,
                }
            })
            .collect();
        VideoCatalog::new(annotated)
    }
}

/// Writes a body stream into a staging file and commits it. The staging
/// file is discarded on any failure, leaving the canonical path untouched.
async fn drain_into(
    mut stream: ByteStream,
    mut staging: StagingVideo,
) -> Result<PathBuf, SyncError> {
    loop {
        match stream.next().await {
            Some(Ok(chunk)) => {
                if let Err(e) = staging.write_chunk(&chunk).await {
                    staging.discard().await;
                    return Err(e.into());
                }
            }
            Some(Err(e)) => {
                staging.discard().await;
                return Err(e.into());
            }
            None => return staging.commit().await.map_err(Into::into),
        }
    }
}
