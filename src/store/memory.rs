//! # In-Memory Backend

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::backend::BookStore;
use super::errors::StoreResult;
use crate::catalog::Book;

/// Book store held in memory. Counts saves so callers can tell whether an
/// operation wrote anything.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: Mutex<Vec<Book>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `books` already stored
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            saves: AtomicUsize::new(0),
        }
    }

    /// Copy of the stored collection
    pub async fn snapshot(&self) -> Vec<Book> {
        self.books.lock().await.clone()
    }

    /// Number of completed `save_all` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn load_all(&self) -> StoreResult<Vec<Book>> {
        Ok(self.books.lock().await.clone())
    }

    async fn save_all(&self, books: &[Book]) -> StoreResult<()> {
        *self.books.lock().await = books.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let store = MemoryStore::with_books(vec![Book::new("Dune", "Herbert", "1")]);

        store
            .save_all(&[Book::new("Emma", "Austen", "2")])
            .await
            .unwrap();

        let books = store.load_all().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "2");
        assert_eq!(store.save_count(), 1);
    }
}
