//! # JSON File Backend
//!
//! The backing document is a pretty-printed JSON array:
//!
//! ```json
//! [
//!   {
//!     "Id": 1,
//!     "Title": "1984"
//!   }
//! ]
//! ```
//!
//! Writes go to a sibling temporary file which is synced and then renamed
//! over the document, so readers only ever observe a complete array.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::model::Book;

use super::backend::StorageBackend;
use super::errors::{StorageError, StorageResult};

/// Book collection stored in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty document if none exists.
    ///
    /// Returns true if a document was created. An existing document is
    /// never touched.
    pub fn initialize(&self) -> StorageResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save_all(&[])?;
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("books.json"));
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> StorageError {
        StorageError::IoError(format!(
            "failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

impl StorageBackend for JsonFileBackend {
    fn try_load_all(&self) -> StorageResult<Vec<Book>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error("read", e)),
        };

        // A zero-length file is what `touch` leaves behind
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            StorageError::Malformed(format!("{}: {}", self.path.display(), e))
        })
    }

    fn save_all(&self, books: &[Book]) -> StorageResult<()> {
        let data = serde_json::to_vec_pretty(books)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error("create parent of", e))?;
            }
        }

        let temp_path = self.temp_path();
        let result = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(&data)?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&temp_path, &self.path));

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error("write", e));
        }

        Ok(())
    }
}
