//! # Catalog Service
//!
//! The four collection operations. Each one reloads the whole collection,
//! changes it in memory and writes it back, all under one lock so that
//! concurrent requests never interleave their load and save.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::book::{Book, NewBookRequest, UpdateBookRequest};
use super::errors::{CatalogError, CatalogResult};
use crate::store::BookStore;

/// How `PUT` treats members missing from the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Overwrite all four mutable members; omitted ones become absent
    #[default]
    Replace,
    /// Only overwrite members present in the body
    Merge,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Replace => write!(f, "replace"),
            UpdateMode::Merge => write!(f, "merge"),
        }
    }
}

impl FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(UpdateMode::Replace),
            "merge" => Ok(UpdateMode::Merge),
            other => Err(format!(
                "unknown update mode '{}', expected 'replace' or 'merge'",
                other
            )),
        }
    }
}

/// Behavior switches for the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPolicy {
    pub update_mode: UpdateMode,
    /// Reject inserts whose ISBN is already stored
    pub unique_isbn: bool,
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::Replace,
            unique_isbn: true,
        }
    }
}

/// Book collection operations over an injected store
#[derive(Debug)]
pub struct Catalog {
    store: Arc<dyn BookStore>,
    policy: CatalogPolicy,
    lock: Mutex<()>,
}

impl Catalog {
    /// Create a catalog with the default policy
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self::with_policy(store, CatalogPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn BookStore>, policy: CatalogPolicy) -> Self {
        Self {
            store,
            policy,
            lock: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> CatalogPolicy {
        self.policy
    }

    /// Every stored book, in stored order
    pub async fn list(&self) -> CatalogResult<Vec<Book>> {
        let _guard = self.lock.lock().await;
        Ok(self.store.load_all().await?)
    }

    /// First book whose ISBN equals `isbn`
    pub async fn find(&self, isbn: &str) -> CatalogResult<Book> {
        let _guard = self.lock.lock().await;
        let books = self.store.load_all().await?;

        let found = books.into_iter().find(|b| b.isbn == isbn);
        debug!(isbn, found = found.is_some(), "book lookup");
        found.ok_or(CatalogError::NotFound)
    }

    /// Validate `request` and append the resulting book.
    ///
    /// Validation happens before the collection is touched.
    pub async fn insert(&self, request: NewBookRequest) -> CatalogResult<Book> {
        let book = request.into_book()?;

        let _guard = self.lock.lock().await;
        let mut books = self.store.load_all().await?;

        if self.policy.unique_isbn && books.iter().any(|b| b.isbn == book.isbn) {
            return Err(CatalogError::Duplicate);
        }

        books.push(book.clone());
        self.store.save_all(&books).await?;

        info!(isbn = %book.isbn, total = books.len(), "book added");
        Ok(book)
    }

    /// Apply `request` to the first book with a matching ISBN
    pub async fn update(&self, isbn: &str, request: UpdateBookRequest) -> CatalogResult<Book> {
        let _guard = self.lock.lock().await;
        let mut books = self.store.load_all().await?;

        let book = books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or(CatalogError::NotFound)?;
        request.apply(book, self.policy.update_mode);
        let updated = book.clone();

        self.store.save_all(&books).await?;

        info!(isbn, mode = %self.policy.update_mode, "book updated");
        Ok(updated)
    }

    /// Remove every book with a matching ISBN, returning how many went
    pub async fn delete(&self, isbn: &str) -> CatalogResult<usize> {
        let _guard = self.lock.lock().await;
        let mut books = self.store.load_all().await?;

        let before = books.len();
        books.retain(|b| b.isbn != isbn);
        let removed = before - books.len();
        if removed == 0 {
            return Err(CatalogError::NotFound);
        }

        self.store.save_all(&books).await?;

        info!(isbn, removed, "book deleted");
        Ok(removed)
    }
}
