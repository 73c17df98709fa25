//! # Record Service
//!
//! Lookup, allow-listed merge, registration and removal of book records.
//! Every operation starts from a full load of the collection; mutations end
//! with a full rewrite.

mod errors;
mod id;
mod patch;
mod service;

pub use errors::{BookError, BookResult};
pub use id::coerce_id;
pub use patch::BookPatch;
pub use service::{BookService, UpdateOutcome};
