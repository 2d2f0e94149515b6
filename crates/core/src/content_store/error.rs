//! Error types for the content store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing stored objects.
#[derive(Debug, Error)]
pub enum ContentStoreError {
    /// Failed to create the store root directory.
    #[error("Failed to create store directory: {path}")]
    RootCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an object to its staging location.
    #[error("Failed to write object: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to rename a completed staging file over the canonical path.
    #[error("Failed to land object at {path}")]
    CommitFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an object back.
    #[error("Failed to read object: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
