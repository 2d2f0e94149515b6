//! End-to-end tests for the sync engine and thumbnail cache, driven
//! through a mock remote catalog and a temp-dir content store.

use std::sync::Arc;

use tempfile::TempDir;

use vidvault_core::testing::{fixtures, MockRemoteCatalog};
use vidvault_core::{
    FsContentStore, SnapshotStore, SyncConfig, SyncEngine, SyncStatus, ThumbnailCache,
    VideoCatalog,
};

struct Harness {
    remote: Arc<MockRemoteCatalog>,
    engine: SyncEngine,
    thumbnails: ThumbnailCache,
    store: FsContentStore,
    _temp: TempDir,
}

fn harness() -> Harness {
    let temp = TempDir::new().unwrap();
    let remote = Arc::new(MockRemoteCatalog::new());
    let store = FsContentStore::new(temp.path()).unwrap();
    let snapshots = SnapshotStore::new(temp.path());
    let engine = SyncEngine::new(
        remote.clone(),
        store.clone(),
        snapshots,
        SyncConfig::default(),
    );
    let thumbnails = ThumbnailCache::new(remote.clone(), store.clone());

    Harness {
        remote,
        engine,
        thumbnails,
        store,
        _temp: temp,
    }
}

#[tokio::test]
async fn test_end_to_end_sync_flow() {
    let h = harness();
    h.remote.add_video("abc", "T").await;

    // Fresh catalog: one entry, not yet cached.
    let catalog = h.engine.list_catalog(true).await.unwrap();
    assert_eq!(catalog.len(), 1);
    let entry = catalog.entry("abc").unwrap();
    assert_eq!(entry.title, "T");
    assert!(!entry.cached_locally);

    // Sync downloads detail + binary into the store.
    let report = h.engine.sync_catalog(&catalog).await;
    assert_eq!(report.downloaded(), 1);
    assert!(report.is_complete());
    assert!(h.store.has_video("abc"));

    let path = match &report.outcome("abc").unwrap().status {
        SyncStatus::Downloaded { path } => path.clone(),
        other => panic!("expected Downloaded, got {:?}", other),
    };
    assert_eq!(path, h.store.video_path("abc"));
    assert_eq!(
        std::fs::read(&path).unwrap(),
        b"video bytes of abc".to_vec()
    );

    // Subsequent listing uses the persisted snapshot, no network, and
    // reports the entry as cached now.
    h.remote.reset_log().await;
    let catalog = h.engine.list_catalog(false).await.unwrap();
    assert!(catalog.entry("abc").unwrap().cached_locally);
    assert_eq!(h.remote.request_log().await.total(), 0);
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let h = harness();
    h.remote.add_video("abc", "T").await;

    let catalog = h.engine.list_catalog(true).await.unwrap();
    let first = h.engine.sync_catalog(&catalog).await;
    assert_eq!(first.downloaded(), 1);

    // Second sync of the same entries: no network, no writes.
    h.remote.reset_log().await;
    let catalog = h.engine.list_catalog(false).await.unwrap();
    let second = h.engine.sync_catalog(&catalog).await;
    assert_eq!(second.downloaded(), 0);
    assert_eq!(second.already_cached(), 1);
    assert!(second.is_complete());
    assert_eq!(h.remote.request_log().await.total(), 0);
}

#[tokio::test]
async fn test_partial_failure_contains_to_one_item() {
    let h = harness();
    h.remote.add_video("a", "A").await;
    h.remote.add_video("b", "B").await;
    h.remote.add_video("c", "C").await;
    h.remote.fail_url(&fixtures::info_url("b")).await;

    let catalog = h.engine.list_catalog(true).await.unwrap();
    let report = h.engine.sync_catalog(&catalog).await;

    assert_eq!(report.downloaded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(!report.is_complete());
    assert!(matches!(
        report.outcome("b").unwrap().status,
        SyncStatus::Failed { .. }
    ));

    // The two healthy items made it into the store regardless.
    assert!(h.store.has_video("a"));
    assert!(h.store.has_video("c"));
    assert!(!h.store.has_video("b"));
}

#[tokio::test]
async fn test_failed_item_is_eligible_on_next_sync() {
    let h = harness();
    h.remote.add_video("a", "A").await;
    h.remote.fail_url(&fixtures::video_url("a")).await;

    let catalog = h.engine.list_catalog(true).await.unwrap();
    let report = h.engine.sync_catalog(&catalog).await;
    assert_eq!(report.failed(), 1);
    assert!(!h.store.has_video("a"));

    // The item stayed uncached, so a later sync picks it up again.
    h.remote.clear_failures().await;
    let catalog = h.engine.list_catalog(false).await.unwrap();
    assert!(!catalog.entry("a").unwrap().cached_locally);
    let report = h.engine.sync_catalog(&catalog).await;
    assert_eq!(report.downloaded(), 1);
    assert!(h.store.has_video("a"));
}

#[tokio::test]
#[should_panic(expected = "exactly one category")]
async fn test_sync_rejects_multi_category_catalog() {
    let h = harness();
    let catalog = VideoCatalog {
        num_categories: 2,
        youtube: vec![fixtures::entry("a", "A", false)],
    };
    h.engine.sync_catalog(&catalog).await;
}

#[tokio::test]
async fn test_offline_fallback_recomputes_cached_flags() {
    let h = harness();
    h.remote.add_video("abc", "T").await;

    // Refresh persists a snapshot in which nothing is cached yet.
    let catalog = h.engine.list_catalog(true).await.unwrap();
    h.engine.sync_catalog(&catalog).await;

    // Network gone: the snapshot is served, with flags recomputed from
    // the store rather than from what was true at save time.
    h.remote.set_index_failure(true).await;
    let catalog = h.engine.list_catalog(false).await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.entry("abc").unwrap().cached_locally);
}

#[tokio::test]
async fn test_refresh_failure_without_snapshot_is_an_error() {
    let h = harness();
    h.remote.set_index_failure(true).await;
    assert!(h.engine.list_catalog(false).await.is_err());
    assert!(h.engine.list_catalog(true).await.is_err());
}

#[tokio::test]
async fn test_forced_refresh_skips_snapshot() {
    let h = harness();
    h.remote.add_video("abc", "T").await;
    h.engine.list_catalog(true).await.unwrap();

    // A forced refresh must hit the remote even with a snapshot present.
    h.remote.reset_log().await;
    h.engine.list_catalog(true).await.unwrap();
    assert_eq!(h.remote.request_log().await.index_fetches, 1);
}

#[tokio::test]
async fn test_overlapping_batches_collapse_duplicate_downloads() {
    let h = harness();
    h.remote.add_video("abc", "T").await;

    let entries = vec![fixtures::entry("abc", "T", false)];
    let (first, second) = tokio::join!(
        h.engine.sync_entries(&entries),
        h.engine.sync_entries(&entries)
    );

    // Exactly one batch performed the download; the binary was fetched
    // once no matter how the two batches interleaved.
    let log = h.remote.request_log().await;
    assert_eq!(log.video_fetches.len(), 1);
    assert_eq!(first.downloaded() + second.downloaded(), 1);
    assert!(h.store.has_video("abc"));
}

#[tokio::test]
async fn test_thumbnail_fetched_once_and_cached() {
    let h = harness();
    h.remote.add_video("abc", "T").await;
    let entry = fixtures::entry("abc", "T", false);

    let thumb = h.thumbnails.get(&entry).await.unwrap();
    assert!(thumb.pending);
    assert!(h.store.has_thumbnail("abc"));
    assert_eq!(h.remote.request_log().await.thumbnail_fetches.len(), 1);

    // Second resolution is served from the sidecar.
    let thumb = h.thumbnails.get(&entry).await.unwrap();
    assert!(thumb.pending);
    assert_eq!(h.remote.request_log().await.thumbnail_fetches.len(), 1);
}

#[tokio::test]
async fn test_thumbnail_pending_clears_after_sync() {
    let h = harness();
    h.remote.add_video("abc", "T").await;

    let catalog = h.engine.list_catalog(true).await.unwrap();
    h.engine.sync_catalog(&catalog).await;

    let entry = fixtures::entry("abc", "T", true);
    let thumb = h.thumbnails.get(&entry).await.unwrap();
    assert!(!thumb.pending);
}

#[tokio::test]
async fn test_thumbnail_invalid_bytes_fail_decode() {
    let h = harness();
    h.remote.add_video("abc", "T").await;
    h.remote
        .set_thumbnail("abc", b"definitely not an image".to_vec())
        .await;

    let entry = fixtures::entry("abc", "T", false);
    let result = h.thumbnails.get(&entry).await;
    assert!(matches!(
        result,
        Err(vidvault_core::ThumbnailError::InvalidImage { .. })
    ));
    // Nothing undecodable is cached.
    assert!(!h.store.has_thumbnail("abc"));
}
