//! bookshelf CLI entry point
//!
//! All logic is delegated to the CLI module.

use bookshelf::cli;
use bookshelf::observability::{Event, Logger};

fn main() {
    if let Err(e) = cli::run() {
        Logger::fatal(
            Event::CommandFailed.as_str(),
            &[("code", e.code().code()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
