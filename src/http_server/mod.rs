//! # Bookshelf HTTP Server Module
//!
//! Axum server exposing the book collection.
//!
//! # Endpoints
//!
//! - `GET /books[?isbn=X]` - List books or look one up
//! - `POST /books` - Add a book
//! - `PUT /books/:isbn` - Update a book
//! - `DELETE /books/:isbn` - Remove a book
//!
//! Every endpoint requires the `x-api-key` header.

pub mod api_key;
pub mod book_routes;
pub mod config;
pub mod errors;
pub mod server;

pub use api_key::{ApiKey, API_KEY_HEADER};
pub use config::{ConfigError, ServerConfig};
pub use errors::{ErrorResponse, HttpError};
pub use server::{build_router, BookServer};
