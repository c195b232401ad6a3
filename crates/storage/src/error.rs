//! Storage error types.

use thiserror::Error;

/// Errors that can occur while persisting a JSON document.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error (create dir, write temp file, rename).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
