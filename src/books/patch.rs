//! Allow-listed update payload

use serde_json::{Map, Value};

use crate::model::Book;

use super::errors::{BookError, BookResult};

/// The recognised subset of an update or registration body.
///
/// Only the fields in [`crate::model::MUTABLE_FIELDS`] are kept; every other
/// key (including `Id`) is discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub print_length: Option<i64>,
    pub publisher: Option<String>,
}

impl BookPatch {
    /// Filter a JSON body down to the allow-listed fields
    pub fn from_value(value: &Value) -> BookResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            BookError::InvalidBody("Request body must be a JSON object".to_string())
        })?;
        Self::from_map(obj)
    }

    /// Filter a JSON object down to the allow-listed fields
    pub fn from_map(obj: &Map<String, Value>) -> BookResult<Self> {
        let mut patch = Self::default();

        for (key, value) in obj {
            match key.as_str() {
                "Title" => patch.title = Some(text_field("Title", value)?),
                "Author" => patch.author = Some(text_field("Author", value)?),
                "Description" => patch.description = Some(text_field("Description", value)?),
                "PrintLength" => patch.print_length = Some(print_length_field(value)?),
                "Publisher" => patch.publisher = Some(text_field("Publisher", value)?),
                _ => {}
            }
        }

        Ok(patch)
    }

    /// True when no allow-listed field was supplied
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Names of the supplied fields, in allow-list order
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("Title");
        }
        if self.author.is_some() {
            fields.push("Author");
        }
        if self.description.is_some() {
            fields.push("Description");
        }
        if self.print_length.is_some() {
            fields.push("PrintLength");
        }
        if self.publisher.is_some() {
            fields.push("Publisher");
        }
        fields
    }

    /// Shallow-merge onto `book`: supplied fields win, the rest are kept
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.set_field("Title", Value::String(title));
        }
        if let Some(author) = self.author {
            book.set_field("Author", Value::String(author));
        }
        if let Some(description) = self.description {
            book.set_field("Description", Value::String(description));
        }
        if let Some(print_length) = self.print_length {
            book.set_field("PrintLength", Value::from(print_length));
        }
        if let Some(publisher) = self.publisher {
            book.set_field("Publisher", Value::String(publisher));
        }
    }
}

fn text_field(name: &'static str, value: &Value) -> BookResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(BookError::InvalidField(name))
}

fn print_length_field(value: &Value) -> BookResult<i64> {
    match value.as_i64() {
        Some(n) if n >= 0 => Ok(n),
        _ => Err(BookError::InvalidField("PrintLength")),
    }
}
