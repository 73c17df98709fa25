//! # Book Record
//!
//! On-disk and on-wire representation of a single book.
//!
//! ```json
//! {
//!   "Id": 1,
//!   "Title": "1984",
//!   "Author": "George Orwell",
//!   "Description": "A dystopian novel",
//!   "PrintLength": 328,
//!   "Publisher": "Secker & Warburg",
//!   "ISBN": "978-0451524935"
//! }
//! ```
//!
//! Only `Id` is typed. Every other key, the five descriptive fields
//! included, is kept in `fields` exactly as stored, so a record written by
//! another tool (a string `PrintLength`, a `null` `Publisher`, an `ISBN`)
//! loads and saves back unchanged. Typed views are offered by the accessors;
//! type checks happen only when a request supplies new values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields that may be changed after a record is created.
pub const MUTABLE_FIELDS: [&str; 5] = ["Title", "Author", "Description", "PrintLength", "Publisher"];

/// A book record keyed by its unique `Id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Primary key, immutable after creation
    #[serde(rename = "Id")]
    pub id: i64,

    /// All other stored keys, untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Book {
    /// Create a record with only an identifier
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.text("Title")
    }

    pub fn author(&self) -> Option<&str> {
        self.text("Author")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("Description")
    }

    /// Page count, when stored as an integer
    pub fn print_length(&self) -> Option<i64> {
        self.fields.get("PrintLength").and_then(Value::as_i64)
    }

    pub fn publisher(&self) -> Option<&str> {
        self.text("Publisher")
    }

    /// Overwrite a single stored key
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Builder-style title setter
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_field("Title", Value::String(title.into()))
    }

    /// Builder-style author setter
    pub fn with_author(self, author: impl Into<String>) -> Self {
        self.with_field("Author", Value::String(author.into()))
    }

    /// Builder-style setter for any stored key
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set_field(key, value);
        self
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}
