//! Error types for the store crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing persisted state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The state directory could not be found or created.
    #[error("State directory error: {0}")]
    StateDirectory(String),

    /// I/O error during key-value file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
