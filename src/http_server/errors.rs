//! HTTP error responses.
//!
//! Every failure leaves as `{"error": "<message>"}`. Storage faults are
//! logged in full but reported to the client only as a generic message.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::catalog::CatalogError;

/// JSON error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum HttpError {
    /// Missing or wrong `x-api-key`
    #[error("Forbidden: Invalid API Key")]
    Forbidden,

    /// Body was not JSON or did not match the expected shape
    #[error("Invalid input")]
    InvalidBody(#[from] JsonRejection),

    /// Query string could not be read as key/value pairs
    #[error("Invalid input")]
    InvalidQuery(#[from] QueryRejection),

    /// Any route fallthrough
    #[error("Not found")]
    NoRoute,

    /// Known path, unsupported method
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Forbidden => StatusCode::FORBIDDEN,
            HttpError::InvalidBody(_) | HttpError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            HttpError::NoRoute => StatusCode::NOT_FOUND,
            HttpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::Catalog(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            HttpError::Catalog(err) if err.is_fatal() => {
                error!(error = %err, "storage failure");
                "Internal Server Error".to_string()
            }
            HttpError::InvalidBody(rejection) => {
                debug!(reason = %rejection.body_text(), "rejected request body");
                self.to_string()
            }
            HttpError::InvalidQuery(rejection) => {
                debug!(reason = %rejection.body_text(), "rejected query string");
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
