//! # Record Service Errors

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for record service operations
pub type BookResult<T> = Result<T, BookError>;

/// Record service errors
#[derive(Debug, Clone, Error)]
pub enum BookError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Identifier path segment was blank
    #[error("Book ID is required")]
    MissingId,

    /// No record with the given identifier
    #[error("Book with ID {0} not found")]
    NotFound(String),

    /// Body is not usable as a patch or registration
    #[error("{0}")]
    InvalidBody(String),

    /// Allow-listed field carried a value of the wrong type
    #[error("Invalid value for field {0}")]
    InvalidField(&'static str),

    /// Registration rejected
    #[error("Failed to register book: {0}")]
    Registration(String),

    /// Registration reused an existing identifier
    #[error("Book with ID {0} already exists")]
    DuplicateId(i64),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl BookError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            BookError::MissingId => 400,
            BookError::InvalidBody(_) => 400,
            BookError::InvalidField(_) => 400,
            BookError::Registration(_) => 400,
            BookError::NotFound(_) => 404,
            BookError::DuplicateId(_) => 409,
            BookError::Storage(_) => 500,
        }
    }

    /// Returns true for failures the client cannot fix
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}
