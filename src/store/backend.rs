//! # Book Store Trait

use async_trait::async_trait;

use super::errors::StoreResult;
use crate::catalog::Book;

/// Whole-collection persistence for books.
///
/// Every operation reads or writes the complete sequence; there is no
/// partial update path.
#[async_trait]
pub trait BookStore: Send + Sync + std::fmt::Debug {
    /// Load every stored book, in stored order
    async fn load_all(&self) -> StoreResult<Vec<Book>>;

    /// Replace the stored collection with `books`
    async fn save_all(&self, books: &[Book]) -> StoreResult<()>;
}
