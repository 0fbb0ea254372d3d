//! # JSON File Backend
//!
//! Keeps the collection as a single pretty-printed JSON array. Saves go to a
//! sibling temporary file first and are renamed over the target, so readers
//! see either the old collection or the new one.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use super::backend::BookStore;
use super::errors::{StoreError, StoreResult};
use crate::catalog::Book;

/// Book store backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `path` without touching the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for `path`, writing an empty collection if the file
    /// does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::new(path);

        let exists = fs::try_exists(&store.path)
            .await
            .map_err(|e| StoreError::io(&store.path, e))?;
        if !exists {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::io(parent, e))?;
            }
            store.save_all(&[]).await?;
            info!(path = %store.path.display(), "created empty book collection");
        }

        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("books.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl BookStore for JsonFileStore {
    async fn load_all(&self) -> StoreResult<Vec<Book>> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        let books: Vec<Book> = serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = books.len(), "loaded books");
        Ok(books)
    }

    async fn save_all(&self, books: &[Book]) -> StoreResult<()> {
        let encoded = serde_json::to_vec_pretty(books).map_err(StoreError::Encode)?;

        let staging = self.staging_path();
        fs::write(&staging, &encoded)
            .await
            .map_err(|e| StoreError::io(&staging, e))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = books.len(), "saved books");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_empty_collection() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/books.json");

        let store = JsonFileStore::open(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        std::fs::write(&path, r#"[{"title":"Dune","author":"Herbert","isbn":"1"}]"#).unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();

        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("books.json"));
        let books = vec![
            Book::new("Dune", "Herbert", "9780441013593").with_publisher("Ace"),
            Book::new("Emma", "Austen", "9780141439587"),
        ];

        store.save_all(&books).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), books);
        assert!(!store.staging_path().exists());
    }

    #[tokio::test]
    async fn test_output_is_two_space_indented() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("books.json"));

        store
            .save_all(&[Book::new("Dune", "Herbert", "1")])
            .await
            .unwrap();

        let written = std::fs::read_to_string(store.path()).unwrap();
        let expected = "[\n  {\n    \"title\": \"Dune\",\n    \"author\": \"Herbert\",\n    \"isbn\": \"1\"\n  }\n]";
        assert_eq!(written, expected);
    }

    #[tokio::test]
    async fn test_save_of_load_preserves_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        let original = r#"[{"title":"Dune","author":"Herbert","publishedDate":"1965","isbn":"1","shelf":"B2"}]"#;
        std::fs::write(&path, original).unwrap();
        let store = JsonFileStore::new(&path);

        let books = store.load_all().await.unwrap();
        store.save_all(&books).await.unwrap();

        let before: serde_json::Value = serde_json::from_str(original).unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("absent.json"));

        let err = store.load_all().await.unwrap_err();
        assert!(err.is_missing());
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
