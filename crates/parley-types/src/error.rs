use thiserror::Error;

/// Errors from the persistence store.
///
/// Callers must not assume partial writes are visible after a failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}
