//! E2E tests for the videos API, running the router in process against a
//! mock remote catalog and a temp-dir content store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vidvault_core::testing::MockRemoteCatalog;
use vidvault_core::{Config, FsContentStore, SnapshotStore, SyncEngine, ThumbnailCache};
use vidvault_server::api::create_router;
use vidvault_server::state::AppState;

/// In-process server with a controllable mock remote.
struct TestFixture {
    router: Router,
    remote: Arc<MockRemoteCatalog>,
    _temp: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = temp.path().to_path_buf();

        let remote = Arc::new(MockRemoteCatalog::new());
        let content = FsContentStore::new(temp.path()).unwrap();
        let snapshots = SnapshotStore::new(temp.path());
        let engine = Arc::new(SyncEngine::new(
            remote.clone(),
            content.clone(),
            snapshots,
            config.sync.clone(),
        ));
        let thumbnails = Arc::new(ThumbnailCache::new(remote.clone(), content));

        let state = Arc::new(AppState::new(config, engine, thumbnails));
        let router = create_router(state);

        Self {
            router,
            remote,
            _temp: temp,
        }
    }

    async fn request(&self, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.request("GET", uri).await;
        (status, parse_json(&body))
    }

    async fn post(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.request("POST", uri).await;
        (status, parse_json(&body))
    }
}

fn parse_json(body: &[u8]) -> Value {
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body).unwrap_or(Value::Null)
    }
}

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let (status, body) = fixture.get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_and_sync_flow() {
    let fixture = TestFixture::new();
    fixture.remote.add_video("abc", "T").await;

    // Fresh listing: entry present, not downloaded.
    let (status, body) = fixture.get("/api/v1/videos?refresh=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["numCategories"], 1);
    assert_eq!(body["youtube"][0]["videoId"], "abc");
    assert_eq!(body["youtube"][0]["isDownloaded"], false);

    // Nothing downloaded yet.
    let (_, body) = fixture.get("/api/v1/videos/downloaded").await;
    assert_eq!(body["youtube"].as_array().unwrap().len(), 0);

    // Full sync.
    let (status, body) = fixture.post("/api/v1/videos/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["downloaded"], 1);
    assert_eq!(body["complete"], true);
    assert_eq!(body["outcomes"][0]["video_id"], "abc");
    assert_eq!(body["outcomes"][0]["status"], "downloaded");

    // Listing now reports it cached, from the snapshot, without remote.
    fixture.remote.reset_log().await;
    let (_, body) = fixture.get("/api/v1/videos").await;
    assert_eq!(body["youtube"][0]["isDownloaded"], true);
    assert_eq!(fixture.remote.request_log().await.total(), 0);

    let (_, body) = fixture.get("/api/v1/videos/downloaded").await;
    assert_eq!(body["youtube"].as_array().unwrap().len(), 1);

    // The binary is served.
    let (status, bytes) = fixture.request("GET", "/api/v1/videos/abc/file").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"video bytes of abc".to_vec());
}

#[tokio::test]
async fn test_sync_single_video() {
    let fixture = TestFixture::new();
    fixture.remote.add_video("abc", "T").await;
    fixture.get("/api/v1/videos?refresh=true").await;

    let (status, body) = fixture.post("/api/v1/videos/abc/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "downloaded");

    // A second sync of the same id is a no-op.
    let (status, body) = fixture.post("/api/v1/videos/abc/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "already_cached");
}

#[tokio::test]
async fn test_sync_unknown_video_is_404() {
    let fixture = TestFixture::new();
    fixture.remote.add_video("abc", "T").await;
    fixture.get("/api/v1/videos?refresh=true").await;

    let (status, body) = fixture.post("/api/v1/videos/nope/sync").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_file_for_uncached_video_is_404() {
    let fixture = TestFixture::new();
    fixture.remote.add_video("abc", "T").await;
    fixture.get("/api/v1/videos?refresh=true").await;

    let (status, _) = fixture.request("GET", "/api/v1/videos/abc/file").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_thumbnail_carries_pending_header() {
    let fixture = TestFixture::new();
    fixture.remote.add_video("abc", "T").await;
    fixture.get("/api/v1/videos?refresh=true").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/videos/abc/thumbnail")
        .body(Body::empty())
        .unwrap();
    let response = fixture.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert_eq!(response.headers()["x-vidvault-pending"], "true");

    // After syncing, the pending flag clears.
    fixture.post("/api/v1/videos/sync").await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/videos/abc/thumbnail")
        .body(Body::empty())
        .unwrap();
    let response = fixture.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-vidvault-pending"], "false");

    // Served from the sidecar: only the first request hit the remote.
    assert_eq!(fixture.remote.request_log().await.thumbnail_fetches.len(), 1);
}

#[tokio::test]
async fn test_remote_failure_maps_to_bad_gateway() {
    let fixture = TestFixture::new();
    fixture.remote.set_index_failure(true).await;

    let (status, _) = fixture.get("/api/v1/videos?refresh=true").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    let (status, body) = fixture.request("GET", "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("# HELP"));
}
