//! # Response Envelopes
//!
//! Success: `{ "message": ..., "data": ... }`. Errors: `{ "message": ... }`.

use serde::Serialize;

/// Success envelope
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Message-only envelope, used for every error
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
