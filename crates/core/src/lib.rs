//! Offline-first mirror of a remote video catalog.
//!
//! The core reconciles remote catalog state with local on-disk state: it
//! fetches catalog metadata, persists a snapshot for offline fallback,
//! downloads binary video content and thumbnails into a filesystem content
//! store, and answers "is this item available locally" queries.

pub mod config;
pub mod content_store;
pub mod library;
pub mod metadata_store;
pub mod metrics;
pub mod remote;
pub mod sync;
pub mod testing;
pub mod thumbnail;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, RemoteConfig,
    SanitizedConfig, ServerConfig, StorageConfig, SyncConfig,
};
pub use content_store::{ContentStoreError, FsContentStore};
pub use library::{ResolvedVideo, VideoCatalog, VideoDetail, VideoEntry, CATEGORY};
pub use metadata_store::{SnapshotError, SnapshotStore};
pub use remote::{HttpCatalogClient, IndexEntry, RemoteCatalog, RemoteError};
pub use sync::{SyncEngine, SyncError, SyncOutcome, SyncReport, SyncStatus};
pub use thumbnail::{Thumbnail, ThumbnailCache, ThumbnailError};
