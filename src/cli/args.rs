//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--config <path>] [--port <port>] ...
//! - bookshelf init [--data-file <path>]
//! - bookshelf check [--data-file <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::UpdateMode;

/// Bookshelf - an API-key gated HTTP service for a JSON book collection
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
    Serve(ServeArgs),

    /// Create an empty book collection file
    Init {
        /// Path to the JSON collection file
        #[arg(long, env = "BOOKS_FILE", default_value = "books.json")]
        data_file: PathBuf,
    },

    /// Load the collection file and report its contents
    Check {
        /// Path to the JSON collection file
        #[arg(long, env = "BOOKS_FILE", default_value = "books.json")]
        data_file: PathBuf,
    },
}

/// Options for `serve`. Anything given here overrides the config file.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "BOOKSHELF_HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Path to the JSON collection file
    #[arg(long, env = "BOOKS_FILE")]
    pub data_file: Option<PathBuf>,

    /// Shared secret expected in the x-api-key header
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// How PUT treats omitted fields: replace or merge
    #[arg(long)]
    pub update_mode: Option<UpdateMode>,

    /// Accept new books whose ISBN is already stored
    #[arg(long)]
    pub allow_duplicate_isbn: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
