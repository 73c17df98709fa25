//! # In-Memory Backend
//!
//! Holds the collection in process memory. Same full-load / full-save
//! contract as the file backend; used for embedding and tests.

use std::sync::RwLock;

use crate::model::Book;

use super::backend::StorageBackend;
use super::errors::{StorageError, StorageResult};

/// Book collection held in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    books: RwLock<Vec<Book>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with `books`
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn try_load_all(&self) -> StorageResult<Vec<Book>> {
        let books = self
            .books
            .read()
            .map_err(|_| StorageError::Internal("Lock poisoned".to_string()))?;
        Ok(books.clone())
    }

    fn save_all(&self, books: &[Book]) -> StorageResult<()> {
        let mut stored = self
            .books
            .write()
            .map_err(|_| StorageError::Internal("Lock poisoned".to_string()))?;
        *stored = books.to_vec();
        Ok(())
    }
}
