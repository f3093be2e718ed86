//! # Error Types
//!
//! The business error taxonomy surfaced to callers of the catalog.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite fault (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  logged via tracing ← original cause stays in the log, never in the    │
//! │       │               error value handed to the caller                  │
//! │       ▼                                                                 │
//! │  CatalogError::Internal                                                │
//! │                                                                         │
//! │  Zero rows for a known identifier                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError::NotFound { entity, id }                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly two kinds reach callers. Everything the storage client can raise
//! collapses into `Internal`; missing identifiers become `NotFound`.

use thiserror::Error;

/// Errors surfaced by catalog repositories.
///
/// These are business errors, not transport errors: upstream callers match
/// on the kind and never see storage-level detail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The requested identifier has no matching row.
    ///
    /// Raised by read-by-id with zero results, and by update/delete
    /// affecting zero rows.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A fault raised by the storage client during a query, insert, or
    /// update. The low-level cause is logged at the conversion point and is
    /// deliberately absent from this value.
    #[error("internal data access error")]
    Internal,
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and identifier.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        CatalogError::NotFound { entity, id }
    }
}

/// Convert storage faults into the opaque `Internal` kind.
///
/// The sqlx error is logged here and discarded; callers only learn that the
/// operation failed internally.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "storage fault");
        CatalogError::Internal
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::migrate::MigrateError> for CatalogError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        tracing::error!(error = %err, "migration fault");
        CatalogError::Internal
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found("product", 42);
        assert_eq!(err.to_string(), "product not found: 42");
    }

    #[test]
    fn test_internal_message_is_opaque() {
        // The Display string must never leak storage detail.
        assert_eq!(CatalogError::Internal.to_string(), "internal data access error");
    }

    #[test]
    fn test_not_found_carries_identifier() {
        let err = CatalogError::not_found("on_sale", 7);
        assert_eq!(err, CatalogError::NotFound { entity: "on_sale", id: 7 });
    }
}
