//! API Key Middleware
//!
//! Every request must carry an `x-api-key` header equal to the configured
//! secret. Anything else is answered with 403 before routing.

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::errors::HttpError;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// The configured shared secret
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    /// Byte-for-byte comparison against a presented header value
    pub fn matches(&self, presented: &[u8]) -> bool {
        self.0.as_bytes().ct_eq(presented).into()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Axum middleware rejecting requests without the right `x-api-key`.
///
/// ```ignore
/// let app = Router::new()
///     .route("/books", get(list))
///     .layer(middleware::from_fn_with_state(ApiKey::new("secret"), require_api_key));
/// ```
pub async fn require_api_key(
    State(key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| key.matches(value.as_bytes()))
        .unwrap_or(false);

    if !authorized {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "rejected request with missing or invalid API key"
        );
        return HttpError::Forbidden.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let key = ApiKey::new("secret123");
        assert!(key.matches(b"secret123"));
        assert!(!key.matches(b"secret12"));
        assert!(!key.matches(b"secret1234"));
        assert!(!key.matches(b"SECRET123"));
        assert!(!key.matches(b""));
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = ApiKey::new("secret123");
        assert_eq!(format!("{:?}", key), "ApiKey(<redacted>)");
    }
}
