//! CLI module for bookshelf
//!
//! - serve: resolve configuration and run the HTTP server
//! - init: create an empty backing document

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, load_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
