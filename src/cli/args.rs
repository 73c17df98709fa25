//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--config <path>] [--port <n>] [--data-file <path>]
//! - bookshelf init  [--config <path>] [--data-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bookshelf - a REST service for book records kept in one JSON document
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Backing document (overrides config and BOOKS_FILE)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Create an empty book document if none exists
    Init {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Backing document (overrides config and BOOKS_FILE)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
