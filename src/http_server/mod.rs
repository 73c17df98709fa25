//! # HTTP Server Module
//!
//! Axum server exposing the book collection.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/books` - List and register
//! - `/api/v1/books/:id` - Fetch, update and delete one record

pub mod book_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod request_log;
pub mod response;
pub mod server;

pub use book_routes::{book_routes, BOOKS_PATH};
pub use config::ServerConfig;
pub use server::{build_router, HttpServer};
