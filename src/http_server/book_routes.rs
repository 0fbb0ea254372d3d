//! Book HTTP Routes
//!
//! - `GET    /books`        list, or look up one book with `?isbn=`
//! - `POST   /books`        add a book
//! - `PUT    /books/:isbn`  update a book
//! - `DELETE /books/:isbn`  remove every book with that ISBN

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};

use super::errors::HttpError;
use crate::catalog::{Book, Catalog, CatalogError, NewBookRequest, UpdateBookRequest};

// ==================
// Shared State
// ==================

/// Book state shared across handlers
#[derive(Debug)]
pub struct BookState {
    pub catalog: Arc<Catalog>,
}

impl BookState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

// ==================
// Request Types
// ==================

/// What `GET /books` was asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookQuery {
    /// No `isbn`, or an empty one
    All,
    /// Exactly one non-empty `isbn`
    Isbn(String),
    /// `isbn` given more than once. No stored ISBN can equal a list.
    Ambiguous,
}

impl BookQuery {
    /// Classify raw query pairs. Keys other than `isbn` are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut isbns = pairs
            .into_iter()
            .filter(|(key, _)| key == "isbn")
            .map(|(_, value)| value);

        match (isbns.next(), isbns.next()) {
            (None, _) => BookQuery::All,
            (Some(isbn), None) if isbn.is_empty() => BookQuery::All,
            (Some(isbn), None) => BookQuery::Isbn(isbn),
            (Some(_), Some(_)) => BookQuery::Ambiguous,
        }
    }
}

// ==================
// Book Routes
// ==================

/// Create book routes
pub fn book_routes(state: Arc<BookState>) -> Router {
    Router::new()
        .route(
            "/books",
            get(list_books_handler)
                .post(create_book_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/books/:isbn",
            put(update_book_handler)
                .delete(delete_book_handler)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_books_handler(
    State(state): State<Arc<BookState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, HttpError> {
    let Query(pairs) = query?;

    match BookQuery::from_pairs(pairs) {
        BookQuery::All => {
            let books = state.catalog.list().await?;
            Ok(Json(books).into_response())
        }
        BookQuery::Isbn(isbn) => {
            let book = state.catalog.find(&isbn).await?;
            Ok(Json(book).into_response())
        }
        BookQuery::Ambiguous => Err(CatalogError::NotFound.into()),
    }
}

async fn create_book_handler(
    State(state): State<Arc<BookState>>,
    payload: Result<Json<NewBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), HttpError> {
    let Json(request) = payload?;
    let book = state.catalog.insert(request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book_handler(
    State(state): State<Arc<BookState>>,
    Path(isbn): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Book>, HttpError> {
    let request = update_request(&headers, &body)?;
    let book = state.catalog.update(&isbn, request).await?;
    Ok(Json(book))
}

async fn delete_book_handler(
    State(state): State<Arc<BookState>>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.catalog.delete(&isbn).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn method_not_allowed() -> HttpError {
    HttpError::MethodNotAllowed
}

/// Parse a `PUT` body. An empty body, or one not sent as JSON, is an
/// update with every member omitted.
fn update_request(headers: &HeaderMap, body: &[u8]) -> Result<UpdateBookRequest, HttpError> {
    if body.is_empty() || !has_json_content_type(headers) {
        return Ok(UpdateBookRequest::default());
    }
    let Json(request) = Json::<UpdateBookRequest>::from_bytes(body)?;
    Ok(request)
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(mime) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };

    let mime = mime.trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_book_query_from_pairs() {
        assert_eq!(BookQuery::from_pairs(pairs(&[])), BookQuery::All);
        assert_eq!(BookQuery::from_pairs(pairs(&[("isbn", "")])), BookQuery::All);
        assert_eq!(
            BookQuery::from_pairs(pairs(&[("page", "2"), ("isbn", "42")])),
            BookQuery::Isbn("42".to_string())
        );
        assert_eq!(
            BookQuery::from_pairs(pairs(&[("isbn", "1"), ("isbn", "2")])),
            BookQuery::Ambiguous
        );
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(has_json_content_type(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/merge-patch+json"),
        );
        assert!(has_json_content_type(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!has_json_content_type(&headers));
    }

    #[test]
    fn test_bodyless_update_is_empty() {
        let request = update_request(&HeaderMap::new(), b"").unwrap();
        assert!(request.title.is_none());
        assert!(request.author.is_none());
    }

    #[test]
    fn test_update_with_bad_json_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        let result = update_request(&headers, b"{\"title\": ");
        assert!(matches!(result, Err(HttpError::InvalidBody(_))));
    }
}
