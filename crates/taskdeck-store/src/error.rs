//! Error types for taskdeck store operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during `LocalStore` writes.
///
/// Reads never fail: absent or unparseable entries degrade to defaults at
/// the load boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store directory could not be created.
    #[error("Failed to create store directory {path}: {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A store entry could not be written (e.g. disk full or permissions).
    #[error("Failed to write store entry '{key}': {source}")]
    WriteEntry {
        /// Key of the entry being written.
        key: &'static str,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Task collection could not be serialized to JSON.
    #[error("Failed to serialize task collection: {0}")]
    Serialize(#[from] serde_json::Error),
}
