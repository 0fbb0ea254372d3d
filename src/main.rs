//! Bookshelf CLI entry point
//!
//! Loads `.env`, installs logging, then hands off to `cli::run`.
//! Errors are printed to stderr with a non-zero exit.

use bookshelf::cli;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookshelf=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
