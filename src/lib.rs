//! bookshelf - a REST service for book records kept in a single JSON document
//!
//! Layers, leaf first:
//! - `storage`: full-document load/save
//! - `books`: lookup, allow-listed merge, registration, removal
//! - `http_server`: axum routes, envelopes, request logging

pub mod books;
pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod storage;
