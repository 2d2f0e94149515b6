//! Filesystem-backed store for downloaded binary objects.
//!
//! Objects are keyed by video identifier. Video content lives at
//! `<root>/<id>.mp4`, thumbnail bytes at `<root>/<id>.thumbnail`; the
//! distinct extensions keep the two namespaces collision-free.
//!
//! Writes are atomic-replace: bytes land in a temp file next to the
//! destination and are renamed over it once complete, so a crashed or
//! failed download never leaves a truncated object at a canonical path.
//!
//! The store performs no locking. Concurrent writers to the same id are
//! expected to be prevented upstream (the sync engine's in-flight
//! registry); overlapping writes are nonetheless safe because the rename
//! is atomic and content for a given id is identical.

mod error;
mod fs_store;

pub use error::ContentStoreError;
pub use fs_store::{FsContentStore, StagingVideo};
