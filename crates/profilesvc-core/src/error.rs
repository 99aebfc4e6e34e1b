//! Storage error type and its conversion into a `ProfileError`.

use profilesvc_model::error::ProfileError;

/// Failures of the embedded store, propagated unchanged from redb.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database file could not be opened or created.
    #[error("failed to open database: {0}")]
    Database(#[from] redb::DatabaseError),

    /// A transaction could not be started.
    #[error("failed to begin transaction: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// A table could not be opened.
    #[error("failed to open table: {0}")]
    Table(#[from] redb::TableError),

    /// A read or write inside a transaction failed.
    #[error("storage failure: {0}")]
    Storage(#[from] redb::StorageError),

    /// The transaction could not be committed.
    #[error("failed to commit transaction: {0}")]
    Commit(#[from] redb::CommitError),

    /// The collection table has not been created yet.
    #[error("collection not initialized: {0}")]
    MissingCollection(String),

    /// The collection name collides with a reserved table.
    #[error("collection name is reserved: {0}")]
    ReservedCollection(String),

    /// A record could not be encoded or decoded.
    #[error("record codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Convert a storage error into a `ProfileError` with the `Storage` code.
///
/// Takes `e` by value because this is used as a closure argument to `.map_err()`.
#[must_use]
pub fn store_error_to_profile(e: StoreError) -> ProfileError {
    ProfileError::storage(e.to_string()).with_source(e)
}
