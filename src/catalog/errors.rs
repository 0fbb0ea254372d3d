//! # Catalog Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog operation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid input")]
    InvalidInput,

    #[error("Book not found")]
    NotFound,

    #[error("Book already exists")]
    Duplicate,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CatalogError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::InvalidInput => 400,
            CatalogError::NotFound => 404,
            CatalogError::Duplicate => 409,
            CatalogError::Storage(_) => 500,
        }
    }

    /// Storage faults are not the caller's fault and are not recoverable here
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatalogError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CatalogError::InvalidInput.status_code(), 400);
        assert_eq!(CatalogError::NotFound.status_code(), 404);
        assert_eq!(CatalogError::Duplicate.status_code(), 409);
    }

    #[test]
    fn test_messages() {
        assert_eq!(CatalogError::InvalidInput.to_string(), "Invalid input");
        assert_eq!(CatalogError::NotFound.to_string(), "Book not found");
        assert!(!CatalogError::NotFound.is_fatal());
    }
}
