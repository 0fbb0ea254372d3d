//! CLI module for Bookshelf
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - init: Create an empty collection file
//! - check: Validate a collection file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{build_config, check, init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
