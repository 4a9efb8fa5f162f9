//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes instead of downcasting opaque boxes.
//! A duplicate URL is not an error: see [`crate::InsertOutcome`].

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQL / connection / busy failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A thread panicked while holding the connection.
    #[error("database lock poisoned")]
    LockPoisoned,

    /// The blocking task running a query was cancelled or panicked.
    #[error("storage task failed: {0}")]
    Task(String),

    /// The database directory could not be created.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}
