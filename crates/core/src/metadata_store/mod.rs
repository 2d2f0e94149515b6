//! Persisted catalog snapshot.
//!
//! The whole catalog is serialized to a single JSON file after every
//! successful remote refresh and read back opportunistically as the
//! offline fallback. The snapshot is a best-effort cache, never a source
//! of truth: saves return a result the caller is expected to log and
//! discard, and any load failure degrades to "no cached catalog".

mod snapshot;

pub use snapshot::{SnapshotError, SnapshotStore, SNAPSHOT_FILE};
