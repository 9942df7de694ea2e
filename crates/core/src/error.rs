//! Error types for the catalog domain layer.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`PaginationError`] - Request-level validation failures of a connection
//! - [`StorageError`] - Database/catalog source errors
//! - [`CatalogError`] - Top-level error returned by connection resolution
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Pagination Errors
// =============================================================================

/// Validation failures raised while ordering or paginating a connection.
///
/// These never abort the whole request: the API layer attaches them to the
/// connection field that produced them and sibling fields still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The sort key is not defined for this entity kind (or context).
    #[error("Unsupported sort key {key} for {kind}")]
    UnsupportedSortKey {
        /// Entity kind the connection lists.
        kind: &'static str,
        /// Requested sort key name.
        key: String,
    },

    /// Malformed, foreign or stale cursor.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Negative `first` or `last`.
    #[error("Invalid page size for {argument}: {value} (must be non-negative)")]
    InvalidPageSize {
        /// Argument name (`first` or `last`).
        argument: &'static str,
        /// Value supplied by the caller.
        value: i32,
    },

    /// Requested page is larger than the configured ceiling.
    #[error("Page size {requested} exceeds the maximum of {max}")]
    PageSizeExceeded {
        /// Number of edges the request would return.
        requested: usize,
        /// Configured maximum page size.
        max: usize,
    },

    /// Global ID could not be decoded.
    #[error("Invalid ID: {0}")]
    InvalidId(String),
}

impl PaginationError {
    /// Stable machine-readable code, exposed as the `code` error extension.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedSortKey { .. } => "UNSUPPORTED_SORT_KEY",
            Self::InvalidCursor(_) => "INVALID_CURSOR",
            Self::InvalidPageSize { .. } => "INVALID_PAGE_SIZE",
            Self::PageSizeExceeded { .. } => "PAGE_SIZE_EXCEEDED",
            Self::InvalidId(_) => "INVALID_ID",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Database and catalog source errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to establish database connection.
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// SQL query execution failed.
    #[error("Query execution error: {0}")]
    QueryError(String),

    /// Requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// A stored row could not be converted into a domain model.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Top-level error for resolving catalog connections.
///
/// Returned by [`crate::services::Paginator::load`], where fetching from the
/// catalog source and paginating the result meet.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The connection arguments were rejected.
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// The catalog source failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CatalogError {
    /// Stable machine-readable code, exposed as the `code` error extension.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pagination(e) => e.code(),
            Self::Storage(StorageError::NotFound(_)) => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for ordering and pagination.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: les codes d'erreur sont stables (contrat avec les clients API)
    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            PaginationError::InvalidCursor("x".into()).code(),
            "INVALID_CURSOR"
        );
        assert_eq!(
            PaginationError::InvalidPageSize {
                argument: "first",
                value: -1
            }
            .code(),
            "INVALID_PAGE_SIZE"
        );
        assert_eq!(
            PaginationError::PageSizeExceeded {
                requested: 300,
                max: 250
            }
            .code(),
            "PAGE_SIZE_EXCEEDED"
        );
        assert_eq!(
            PaginationError::UnsupportedSortKey {
                kind: "image",
                key: "SKU".into()
            }
            .code(),
            "UNSUPPORTED_SORT_KEY"
        );
    }

    // Le message original est préservé à travers la conversion
    #[test]
    fn test_error_conversion_chain() {
        let err: CatalogError = StorageError::QueryError("db failed".into()).into();
        assert!(err.to_string().contains("db failed"));

        let err: CatalogError = PaginationError::InvalidPageSize {
            argument: "last",
            value: -3,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("last") && msg.contains("-3"));
        assert_eq!(err.code(), "INVALID_PAGE_SIZE");
    }

    #[test]
    fn test_storage_error_codes() {
        let err: CatalogError = StorageError::NotFound("store 9".into()).into();
        assert_eq!(err.code(), "NOT_FOUND");

        let err: CatalogError = StorageError::ConnectionError("refused".into()).into();
        assert_eq!(err.code(), "STORAGE_ERROR");
    }
}
