//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The document could not be read or written
    #[error("I/O error: {0}")]
    IoError(String),

    /// The document exists but is not a JSON array of books
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// The collection could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
