//! The synchronization engine.
//!
//! Reconciles the remote catalog against the local content store: annotates
//! entries with their cached status, determines the missing-item set, runs
//! the per-video fetch-detail / download pipelines concurrently, and
//! aggregates per-item outcomes without ever failing a whole batch for one
//! bad item.
//!
//! One engine instance is constructed at process start and handed to every
//! consumer; all cache and sync state flows through it.

mod engine;
mod types;

pub use engine::SyncEngine;
pub use types::{SyncError, SyncOutcome, SyncReport, SyncStatus};
