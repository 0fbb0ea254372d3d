//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero. The
//! printed line starts with a stable `BOOKSHELF_*` code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::http_server::ConfigError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration missing or invalid
    ConfigError,
    /// I/O error (stdout, runtime)
    IoError,
    /// Collection file already exists
    AlreadyInitialized,
    /// Collection file unreadable or malformed
    StorageError,
    /// Server failed to start or crashed
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BOOKSHELF_CONFIG_ERROR",
            Self::IoError => "BOOKSHELF_IO_ERROR",
            Self::AlreadyInitialized => "BOOKSHELF_ALREADY_INITIALIZED",
            Self::StorageError => "BOOKSHELF_STORAGE_ERROR",
            Self::ServeFailed => "BOOKSHELF_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("BOOKSHELF_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    #[error("BOOKSHELF_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("BOOKSHELF_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("BOOKSHELF_ALREADY_INITIALIZED: collection file {} already exists", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("BOOKSHELF_STORAGE_ERROR: {0}")]
    Storage(#[from] StoreError),

    #[error("BOOKSHELF_SERVE_FAILED: HTTP server failed: {0}")]
    ServeFailed(#[source] io::Error),
}

impl CliError {
    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        match self {
            CliError::Config(_) => CliErrorCode::ConfigError,
            CliError::Io(_) | CliError::Json(_) => CliErrorCode::IoError,
            CliError::AlreadyInitialized(_) => CliErrorCode::AlreadyInitialized,
            CliError::Storage(_) => CliErrorCode::StorageError,
            CliError::ServeFailed(_) => CliErrorCode::ServeFailed,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
