//! # Storage Backend Trait

use crate::model::Book;
use crate::observability::{Event, Logger};

use super::errors::StorageResult;

/// Backend holding the durable copy of the book collection
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Read the full collection in document order.
    ///
    /// A missing document is an empty collection. Unreadable or malformed
    /// documents are errors.
    fn try_load_all(&self) -> StorageResult<Vec<Book>>;

    /// Replace the full collection
    fn save_all(&self, books: &[Book]) -> StorageResult<()>;

    /// Read the full collection, serving any failure as an empty collection.
    ///
    /// The cause is logged at WARN; callers cannot tell "no books" from
    /// "storage error".
    fn load_all(&self) -> Vec<Book> {
        match self.try_load_all() {
            Ok(books) => books,
            Err(e) => {
                let reason = e.to_string();
                Logger::warn(
                    Event::StorageReadDegraded.as_str(),
                    &[("reason", reason.as_str())],
                );
                Vec::new()
            }
        }
    }
}
