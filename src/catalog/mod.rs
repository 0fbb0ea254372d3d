//! # Book Catalog
//!
//! Book records, request validation and the collection operations built on
//! top of a [`BookStore`](crate::store::BookStore).

pub mod book;
pub mod errors;
pub mod isbn;
pub mod service;

pub use book::{duplicate_isbns, Book, NewBookRequest, UpdateBookRequest};
pub use errors::{CatalogError, CatalogResult};
pub use isbn::is_numeric_like;
pub use service::{Catalog, CatalogPolicy, UpdateMode};
