//! Observability for bookshelf
//!
//! - Structured logging (JSON lines)
//! - Typed events
//! - Elapsed-time helper for request logging
//!
//! ```ignore
//! use bookshelf::observability::{Event, Logger};
//!
//! Logger::info(Event::BookFetched.as_str(), &[("id", "3")]);
//! ```

mod events;
mod logger;
mod timer;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use timer::Timer;
