//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog refreshes and snapshot fallbacks
//! - Binary content downloads
//! - Thumbnail resolution

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Remote catalog index fetches by result.
pub static CATALOG_REFRESHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "vidvault_catalog_refreshes_total",
            "Total remote catalog index fetches",
        ),
        &["result"], // "success", "error"
    )
    .unwrap()
});

/// Catalog reads served from the persisted snapshot without a network call.
pub static SNAPSHOT_HITS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vidvault_snapshot_hits_total",
        "Catalog reads served from the persisted snapshot",
    )
    .unwrap()
});

// =============================================================================
// Download Metrics
// =============================================================================

/// Downloads started total.
pub static DOWNLOADS_STARTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("vidvault_downloads_started_total", "Total downloads started").unwrap()
});

/// Downloads completed total.
pub static DOWNLOADS_COMPLETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vidvault_downloads_completed_total",
        "Total downloads completed successfully",
    )
    .unwrap()
});

/// Downloads failed total.
pub static DOWNLOADS_FAILED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vidvault_downloads_failed_total",
        "Total downloads that failed",
    )
    .unwrap()
});

/// Download duration in seconds.
pub static DOWNLOAD_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("vidvault_download_duration_seconds", "Duration of downloads").buckets(
            vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0],
        ),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

// =============================================================================
// Thumbnail Metrics
// =============================================================================

/// Thumbnail resolutions by source.
pub static THUMBNAIL_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "vidvault_thumbnail_fetches_total",
            "Total thumbnail resolutions",
        ),
        &["source"], // "cache", "remote"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_REFRESHES.clone()),
        Box::new(SNAPSHOT_HITS.clone()),
        Box::new(DOWNLOADS_STARTED.clone()),
        Box::new(DOWNLOADS_COMPLETED.clone()),
        Box::new(DOWNLOADS_FAILED.clone()),
        Box::new(DOWNLOAD_DURATION.clone()),
        Box::new(THUMBNAIL_FETCHES.clone()),
    ]
}
