//! Observable events
//!
//! Every log line emitted by the service carries one of these names.

/// Observable events in bookshelf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration resolved
    ConfigLoaded,
    /// Listener bound, ready for requests
    ServerStart,
    /// Listener stopped
    ServerStop,
    /// Empty document created by `init`
    DocumentInitialized,
    /// Command exited with an error
    CommandFailed,

    // Record service
    BooksListed,
    BookFetched,
    BookNotFound,
    BookUpdated,
    /// Update carried no allow-listed field
    BookUpdateNoop,
    BookRegistered,
    BookDeleted,
    /// Request rejected before touching storage
    BookRejected,

    // Storage
    /// Read failed and was served as an empty collection
    StorageReadDegraded,
    /// Document could not be read during a mutation
    StorageReadFailed,
    StorageWriteFailed,

    // HTTP
    HttpRequest,
    /// Handler failed with an internal error
    HttpInternalError,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::ServerStop => "SERVER_STOP",
            Event::DocumentInitialized => "DOCUMENT_INITIALIZED",
            Event::CommandFailed => "COMMAND_FAILED",

            Event::BooksListed => "BOOKS_LISTED",
            Event::BookFetched => "BOOK_FETCHED",
            Event::BookNotFound => "BOOK_NOT_FOUND",
            Event::BookUpdated => "BOOK_UPDATED",
            Event::BookUpdateNoop => "BOOK_UPDATE_NOOP",
            Event::BookRegistered => "BOOK_REGISTERED",
            Event::BookDeleted => "BOOK_DELETED",
            Event::BookRejected => "BOOK_REJECTED",

            Event::StorageReadDegraded => "STORAGE_READ_DEGRADED",
            Event::StorageReadFailed => "STORAGE_READ_FAILED",
            Event::StorageWriteFailed => "STORAGE_WRITE_FAILED",

            Event::HttpRequest => "HTTP_REQUEST",
            Event::HttpInternalError => "HTTP_INTERNAL_ERROR",
        }
    }
}
