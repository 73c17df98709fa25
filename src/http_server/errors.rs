//! # HTTP Error Mapping
//!
//! Client errors carry their own message. Server errors are logged with
//! their cause and answered with a fixed generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::books::BookError;
use crate::observability::{Event, Logger};

use super::response::MessageResponse;

/// Message returned for every 5xx
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when the body is not parseable JSON
pub const INVALID_BODY_MESSAGE: &str = "Invalid JSON body";

impl From<JsonRejection> for BookError {
    fn from(rejection: JsonRejection) -> Self {
        Logger::warn(
            Event::BookRejected.as_str(),
            &[("reason", rejection.body_text().as_str())],
        );
        BookError::InvalidBody(INVALID_BODY_MESSAGE.to_string())
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.is_internal() {
            let reason = self.to_string();
            Logger::error(
                Event::HttpInternalError.as_str(),
                &[("reason", reason.as_str())],
            );
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
