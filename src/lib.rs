//! bookshelf - an API-key gated HTTP service for a JSON-file book collection
//!
//! Layers, leaf first: `store` persists the whole collection, `catalog`
//! validates and applies the four operations, `http_server` exposes them
//! behind the `x-api-key` check, `cli` starts everything.

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod store;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
