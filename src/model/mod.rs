//! Book record model

mod book;

pub use book::{Book, MUTABLE_FIELDS};
