//! # Book Service
//!
//! Reads take no lock and serve storage failures as an empty collection.
//! Mutations hold the write lock across load → modify → save and use the
//! strict load, so an unreadable document is reported instead of being
//! overwritten.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::model::{Book, MUTABLE_FIELDS};
use crate::observability::{Event, Logger};
use crate::storage::{StorageBackend, StorageError};

use super::errors::{BookError, BookResult};
use super::id::coerce_id;
use super::patch::BookPatch;

/// Result of an update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// No record with the given identifier
    NotFound,
    /// The body carried no allow-listed field; nothing was written
    NoOp(Book),
    /// Merged and persisted
    Updated(Book),
}

/// Record service over a storage backend
#[derive(Debug)]
pub struct BookService<B: StorageBackend> {
    backend: B,
    write_lock: Mutex<()>,
}

impl<B: StorageBackend> BookService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying storage backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All records in document order
    pub fn list_all(&self) -> Vec<Book> {
        let books = self.backend.load_all();
        let count = books.len().to_string();
        Logger::trace(Event::BooksListed.as_str(), &[("count", count.as_str())]);
        books
    }

    /// First record whose `Id` equals the coerced identifier
    pub fn get_by_id(&self, raw_id: &str) -> BookResult<Option<Book>> {
        let Some(id) = coerce_id(raw_id)? else {
            log_not_found(raw_id);
            return Ok(None);
        };

        let book = self.backend.load_all().into_iter().find(|b| b.id == id);
        match &book {
            Some(_) => Logger::info(Event::BookFetched.as_str(), &[("id", raw_id)]),
            None => log_not_found(raw_id),
        }
        Ok(book)
    }

    /// Merge the allow-listed part of `body` into the matching record
    pub fn update(&self, raw_id: &str, body: &Value) -> BookResult<UpdateOutcome> {
        let id = coerce_id(raw_id)?;
        let patch = BookPatch::from_value(body).map_err(|e| reject(raw_id, e))?;

        let Some(id) = id else {
            log_not_found(raw_id);
            return Ok(UpdateOutcome::NotFound);
        };

        let _guard = self.lock_writes();
        let mut books = self.load_for_write()?;

        let Some(index) = books.iter().position(|b| b.id == id) else {
            log_not_found(raw_id);
            return Ok(UpdateOutcome::NotFound);
        };

        if patch.is_empty() {
            Logger::warn(Event::BookUpdateNoop.as_str(), &[("id", raw_id)]);
            return Ok(UpdateOutcome::NoOp(books.swap_remove(index)));
        }

        let fields = patch.fields().join(",");
        patch.apply(&mut books[index]);
        self.save(&books)?;

        Logger::info(
            Event::BookUpdated.as_str(),
            &[("id", raw_id), ("fields", fields.as_str())],
        );
        Ok(UpdateOutcome::Updated(books.swap_remove(index)))
    }

    /// Append a new record.
    ///
    /// `Title` and `Author` are required. A supplied `Id` must be an unused
    /// integer; an omitted one is assigned as one past the current maximum.
    /// Fields outside the allow-list are stored as given.
    pub fn register(&self, body: &Value) -> BookResult<Book> {
        let obj = body.as_object().ok_or_else(|| {
            reject("new", BookError::InvalidBody("Request body must be a JSON object".to_string()))
        })?;
        let draft = Draft::from_map(obj).map_err(|e| reject("new", e))?;

        let _guard = self.lock_writes();
        let mut books = self.load_for_write()?;

        let id = match draft.id {
            Some(id) if books.iter().any(|b| b.id == id) => {
                return Err(reject("new", BookError::DuplicateId(id)));
            }
            Some(id) => id,
            None => next_id(&books).map_err(|e| reject("new", e))?,
        };

        let mut book = Book::new(id);
        book.fields = draft.extra;
        draft.patch.apply(&mut book);

        books.push(book.clone());
        self.save(&books)?;

        let id_str = id.to_string();
        Logger::info(Event::BookRegistered.as_str(), &[("id", id_str.as_str())]);
        Ok(book)
    }

    /// Remove the matching record, returning it
    pub fn delete_by_id(&self, raw_id: &str) -> BookResult<Option<Book>> {
        let Some(id) = coerce_id(raw_id)? else {
            log_not_found(raw_id);
            return Ok(None);
        };

        let _guard = self.lock_writes();
        let mut books = self.load_for_write()?;

        let Some(index) = books.iter().position(|b| b.id == id) else {
            log_not_found(raw_id);
            return Ok(None);
        };

        let removed = books.remove(index);
        self.save(&books)?;

        Logger::info(Event::BookDeleted.as_str(), &[("id", raw_id)]);
        Ok(Some(removed))
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn load_for_write(&self) -> BookResult<Vec<Book>> {
        self.backend.try_load_all().map_err(|e| {
            log_storage_failure(Event::StorageReadFailed, &e);
            BookError::from(e)
        })
    }

    fn save(&self, books: &[Book]) -> BookResult<()> {
        self.backend.save_all(books).map_err(|e| {
            log_storage_failure(Event::StorageWriteFailed, &e);
            BookError::from(e)
        })
    }
}

/// Validated registration body
struct Draft {
    id: Option<i64>,
    patch: BookPatch,
    extra: Map<String, Value>,
}

impl Draft {
    fn from_map(obj: &Map<String, Value>) -> BookResult<Self> {
        let patch = BookPatch::from_map(obj).map_err(|e| match e {
            BookError::InvalidField(field) => {
                BookError::Registration(format!("invalid value for field {}", field))
            }
            other => other,
        })?;

        for (field, value) in [("Title", &patch.title), ("Author", &patch.author)] {
            if value.as_deref().map_or(true, |s| s.trim().is_empty()) {
                return Err(BookError::Registration(format!("{} is required", field)));
            }
        }

        let id = match obj.get("Id") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_i64().ok_or_else(|| {
                BookError::Registration("Id must be an integer".to_string())
            })?),
        };

        let extra = obj
            .iter()
            .filter(|(key, _)| key.as_str() != "Id" && !MUTABLE_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self { id, patch, extra })
    }
}

fn next_id(books: &[Book]) -> BookResult<i64> {
    match books.iter().map(|b| b.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| BookError::Registration("no identifier available".to_string())),
    }
}

fn reject(id: &str, error: BookError) -> BookError {
    let reason = error.to_string();
    Logger::warn(
        Event::BookRejected.as_str(),
        &[("id", id), ("reason", reason.as_str())],
    );
    error
}

fn log_not_found(raw_id: &str) {
    Logger::warn(Event::BookNotFound.as_str(), &[("id", raw_id)]);
}

fn log_storage_failure(event: Event, error: &StorageError) {
    let reason = error.to_string();
    Logger::error(event.as_str(), &[("reason", reason.as_str())]);
}
