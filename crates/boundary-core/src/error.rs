//! # Errors
//!
//! Resolution itself is total and has no error type. Errors only come from
//! scope-record validation and the scope store.

use thiserror::Error;

/// A scope-record request that cannot be keyed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// `propertyId` or `tenantAccountId` is absent, empty, or not a string.
    #[error("propertyId and tenantAccountId are required")]
    MissingIdentifiers,

    /// The scope document is not a JSON object.
    #[error("scope document must be a JSON object")]
    NotAnObject,
}

/// Failures of the scope store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// The stored record envelope could not be encoded or decoded.
    #[error("record encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    /// The stored field document is not valid JSON.
    #[error("field encoding error: {0}")]
    Fields(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the caller, not the store, is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Scope(_))
    }
}
