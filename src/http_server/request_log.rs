//! Request logging middleware
//!
//! One `HTTP_REQUEST` line per request. 5xx logs at ERROR, 4xx at WARN,
//! everything else at INFO. The request id is taken from `x-request-id`
//! when the client sends one and echoed back on the response.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::observability::{Event, Logger, Severity, Timer};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Log level for a response status
pub fn severity_for_status(status: StatusCode) -> Severity {
    if status.is_server_error() {
        Severity::Error
    } else if status.is_client_error() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Middleware entry point for `axum::middleware::from_fn`
pub async fn log_requests(request: Request, next: Next) -> Response {
    let timer = Timer::new();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    let latency_ms = timer.elapsed_ms();
    Logger::log(
        severity_for_status(status),
        Event::HttpRequest.as_str(),
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", status.as_str()),
            ("latency_ms", latency_ms.as_str()),
            ("request_id", request_id.as_str()),
        ],
    );

    response
}
