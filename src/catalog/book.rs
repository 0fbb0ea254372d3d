//! # Book Records
//!
//! The stored record plus the request bodies that create or change one.
//! Required vs. optional members are encoded in the types; the remaining
//! presence checks happen in [`NewBookRequest::into_book`].

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::errors::{CatalogError, CatalogResult};
use super::isbn::is_numeric_like;
use super::service::UpdateMode;

/// A book as stored in the backing file and served over HTTP.
///
/// `title` and `author` are optional here even though creation requires
/// them: a replacing update may clear them, and hand-edited files may lack
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    #[serde(
        rename = "publishedDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_date: Option<String>,

    pub isbn: String,

    /// Members this service does not model. Carried through rewrites untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// Build a record with the required members set
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            publisher: None,
            published_date: None,
            isbn: isbn.into(),
            extra: Map::new(),
        }
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }
}

/// Body of `POST /books`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBookRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub publisher: Option<String>,

    #[serde(rename = "publishedDate", default)]
    pub published_date: Option<String>,

    /// Accepted as a JSON string or number, always kept as a string. The
    /// number zero counts as missing.
    #[serde(default, deserialize_with = "isbn_text")]
    pub isbn: Option<String>,
}

impl NewBookRequest {
    /// Validate the request and build the record to append.
    ///
    /// `title`, `author` and `isbn` must be present and non-empty, and `isbn`
    /// must read as a number.
    pub fn into_book(self) -> CatalogResult<Book> {
        let title = non_empty(self.title).ok_or(CatalogError::InvalidInput)?;
        let author = non_empty(self.author).ok_or(CatalogError::InvalidInput)?;
        let isbn = non_empty(self.isbn)
            .filter(|isbn| is_numeric_like(isbn))
            .ok_or(CatalogError::InvalidInput)?;

        Ok(Book {
            title: Some(title),
            author: Some(author),
            publisher: self.publisher,
            published_date: self.published_date,
            isbn,
            extra: Map::new(),
        })
    }
}

/// Body of `PUT /books/:isbn`. The key itself comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub publisher: Option<String>,

    #[serde(rename = "publishedDate", default)]
    pub published_date: Option<String>,
}

impl UpdateBookRequest {
    /// Apply the update to `book`. `isbn` and unmodelled members never change.
    pub fn apply(self, book: &mut Book, mode: UpdateMode) {
        match mode {
            UpdateMode::Replace => {
                book.title = self.title;
                book.author = self.author;
                book.publisher = self.publisher;
                book.published_date = self.published_date;
            }
            UpdateMode::Merge => {
                if self.title.is_some() {
                    book.title = self.title;
                }
                if self.author.is_some() {
                    book.author = self.author;
                }
                if self.publisher.is_some() {
                    book.publisher = self.publisher;
                }
                if self.published_date.is_some() {
                    book.published_date = self.published_date;
                }
            }
        }
    }
}

/// ISBNs that appear on more than one record, in sorted order.
pub fn duplicate_isbns(books: &[Book]) -> Vec<&str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for book in books {
        *counts.entry(book.isbn.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(isbn, _)| isbn)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn isbn_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "isbn must be a string or a number, got {}",
            other
        ))),
    }
}
