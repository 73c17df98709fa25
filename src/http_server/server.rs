//! # HTTP Server
//!
//! Combines the book and health routers with CORS and request logging,
//! and runs them on a tokio listener until Ctrl-C.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::books::BookService;
use crate::observability::{Event, Logger};
use crate::storage::{JsonFileBackend, StorageBackend};

use super::book_routes::book_routes;
use super::config::{parse_cors_origin, ServerConfig};
use super::observability_routes::{health_routes, route_not_found};
use super::request_log::log_requests;

/// Build the full router over any storage backend
pub fn build_router<B: StorageBackend + 'static>(
    service: Arc<BookService<B>>,
    cors_origins: &[String],
) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(book_routes(service))
        .fallback(route_not_found)
        .layer(cors_layer(cors_origins))
        .layer(middleware::from_fn(log_requests))
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        // Entries were checked by `ServerConfig::validate`
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| parse_cors_origin(origin).ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// HTTP server backed by the configured JSON document
pub struct HttpServer {
    config: ServerConfig,
    service: Arc<BookService<JsonFileBackend>>,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: ServerConfig) -> Self {
        let backend = JsonFileBackend::new(config.data_file.clone());
        let service = Arc::new(BookService::new(backend));
        Self { config, service }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.service), &self.config.cors_origins)
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let local_addr = listener.local_addr()?.to_string();
        let data_file = self.config.data_file.display().to_string();

        Logger::info(
            Event::ServerStart.as_str(),
            &[
                ("addr", local_addr.as_str()),
                ("data_file", data_file.as_str()),
                ("environment", self.config.environment.as_str()),
            ],
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info(Event::ServerStop.as_str(), &[("addr", local_addr.as_str())]);
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
