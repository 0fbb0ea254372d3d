//! # HTTP Server
//!
//! Wires the book routes behind the API key check and request tracing, and
//! serves them until Ctrl-C.

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::api_key::{require_api_key, ApiKey};
use super::book_routes::{book_routes, BookState};
use super::config::{ConfigError, ServerConfig};
use super::errors::HttpError;
use crate::catalog::Catalog;
use crate::store::BookStore;

/// Build the application router.
///
/// The API key check wraps every route and the fallback, so unknown paths
/// are also answered with 403 when the key is wrong.
pub fn build_router(catalog: Arc<Catalog>, api_key: ApiKey) -> Router {
    let book_state = Arc::new(BookState::new(catalog));

    Router::new()
        .merge(book_routes(book_state))
        .fallback(|| async { HttpError::NoRoute })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(api_key, require_api_key)),
        )
}

/// HTTP server for the book collection
pub struct BookServer {
    config: ServerConfig,
    router: Router,
}

impl BookServer {
    /// Create a server over `store` using `config`
    pub fn new(config: ServerConfig, store: Arc<dyn BookStore>) -> Result<Self, ConfigError> {
        config.validate()?;
        let api_key = ApiKey::new(config.api_key.clone().unwrap_or_default());
        let catalog = Arc::new(Catalog::with_policy(store, config.policy()));
        let router = build_router(catalog, api_key);
        Ok(Self { config, router })
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        info!(
            %addr,
            data_file = %self.config.data_file.display(),
            update_mode = %self.config.update_mode,
            unique_isbn = self.config.unique_isbn,
            "book server listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("book server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn config() -> ServerConfig {
        ServerConfig {
            api_key: Some("secret123".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_server_creation() {
        let server = BookServer::new(config(), Arc::new(MemoryStore::new())).unwrap();
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = ServerConfig {
            port: 8080,
            ..config()
        };
        let server = BookServer::new(config, Arc::new(MemoryStore::new())).unwrap();
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_requires_api_key() {
        let result = BookServer::new(ServerConfig::default(), Arc::new(MemoryStore::new()));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }
}
