//! Result types for sync batches.

use std::path::PathBuf;

use thiserror::Error;

use crate::content_store::ContentStoreError;
use crate::remote::RemoteError;

/// Errors that can fail a single video's sync pipeline.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Detail fetch or binary download failed.
    #[error("Remote fetch failed: {0}")]
    Remote(#[from] RemoteError),

    /// The downloaded bytes could not be stored.
    #[error("Content store failure: {0}")]
    Store(#[from] ContentStoreError),
}

/// Terminal state of one entry within a sync batch.
#[derive(Debug)]
pub enum SyncStatus {
    /// Binary content landed in the content store.
    Downloaded { path: PathBuf },
    /// The entry was already cached; no network or filesystem work was done.
    AlreadyCached,
    /// Another batch is currently downloading this id; skipped rather than
    /// downloaded twice.
    InFlight,
    /// The pipeline failed; the item remains uncached and is eligible for a
    /// later sync call.
    Failed { error: SyncError },
}

/// Outcome of one entry, keyed by its identifier so callers can correlate
/// results regardless of completion order.
#[derive(Debug)]
pub struct SyncOutcome {
    pub video_id: String,
    pub status: SyncStatus,
}

/// Aggregate result of a sync batch: one outcome per input entry, in input
/// order.
///
/// A partial failure is not an error; callers inspect the outcomes and
/// decide whether the completion level is acceptable.
#[derive(Debug)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
}

impl SyncReport {
    /// Outcome for a specific entry.
    pub fn outcome(&self, video_id: &str) -> Option<&SyncOutcome> {
        self.outcomes.iter().find(|o| o.video_id == video_id)
    }

    /// Number of entries downloaded by this batch.
    pub fn downloaded(&self) -> usize {
        self.count(|s| matches!(s, SyncStatus::Downloaded { .. }))
    }

    /// Number of entries skipped because they were already cached.
    pub fn already_cached(&self) -> usize {
        self.count(|s| matches!(s, SyncStatus::AlreadyCached))
    }

    /// Number of entries skipped because a concurrent batch owns them.
    pub fn in_flight(&self) -> usize {
        self.count(|s| matches!(s, SyncStatus::InFlight))
    }

    /// Number of failed entries.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, SyncStatus::Failed { .. }))
    }

    /// Whether every entry is now cached or was cached already.
    pub fn is_complete(&self) -> bool {
        self.failed() == 0 && self.in_flight() == 0
    }

    fn count(&self, predicate: impl Fn(&SyncStatus) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| predicate(&o.status))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SyncReport {
        SyncReport {
            outcomes: vec![
                SyncOutcome {
                    video_id: "a".to_string(),
                    status: SyncStatus::Downloaded {
                        path: PathBuf::from("/data/a.mp4"),
                    },
                },
                SyncOutcome {
                    video_id: "b".to_string(),
                    status: SyncStatus::AlreadyCached,
                },
                SyncOutcome {
                    video_id: "c".to_string(),
                    status: SyncStatus::Failed {
                        error: SyncError::Remote(crate::remote::RemoteError::Status {
                            url: "https://videos.example.com/c.mp4".to_string(),
                            status: 500,
                        }),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_report_counts() {
        let report = report();
        assert_eq!(report.downloaded(), 1);
        assert_eq!(report.already_cached(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.in_flight(), 0);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_outcome_lookup() {
        let report = report();
        assert!(matches!(
            report.outcome("b").unwrap().status,
            SyncStatus::AlreadyCached
        ));
        assert!(report.outcome("missing").is_none());
    }
}
