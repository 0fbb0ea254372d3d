//! HTTP Server Configuration
//!
//! Host, port, backing file, API key and catalog behavior. Values come from
//! defaults, an optional JSON file, and command-line flags or environment
//! variables, in increasing precedence (see `cli::args`).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogPolicy, UpdateMode};

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("API key is not configured (set API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("port must be > 0")]
    InvalidPort,

    #[error("data_file must not be empty")]
    EmptyDataFile,
}

/// HTTP server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the collection (default: "books.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Expected value of the `x-api-key` header (required)
    #[serde(default)]
    pub api_key: Option<String>,

    /// PUT semantics for omitted members (default: replace)
    #[serde(default)]
    pub update_mode: UpdateMode,

    /// Reject inserts with an ISBN already stored (default: true)
    #[serde(default = "default_unique_isbn")]
    pub unique_isbn: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("books.json")
}

fn default_unique_isbn() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            api_key: None,
            update_mode: UpdateMode::default(),
            unique_isbn: default_unique_isbn(),
        }
    }
}

// The API key stays out of logs and panic messages.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_file", &self.data_file)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("update_mode", &self.update_mode)
            .field("unique_isbn", &self.unique_isbn)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file; missing keys take defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that the configuration can start a server
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingApiKey);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Catalog behavior selected by this configuration
    pub fn policy(&self) -> CatalogPolicy {
        CatalogPolicy {
            update_mode: self.update_mode,
            unique_isbn: self.unique_isbn,
        }
    }
}
