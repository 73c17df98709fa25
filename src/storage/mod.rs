//! # Storage Accessor
//!
//! Reads and writes the whole book collection as one JSON document.
//! There is no cache and no partial I/O: every call touches the full
//! collection.

mod backend;
mod errors;
mod json_file;
mod memory;

pub use backend::StorageBackend;
pub use errors::{StorageError, StorageResult};
pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
