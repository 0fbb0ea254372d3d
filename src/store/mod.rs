//! # Book Store
//!
//! Persistence for the book collection. The collection is always loaded and
//! saved whole.

pub mod backend;
pub mod errors;
pub mod json_file;
pub mod memory;

pub use backend::BookStore;
pub use errors::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
