//! Storage error types
//!
//! Error codes:
//! - ITEMDB_STORAGE_OPEN_FAILED
//! - ITEMDB_STORAGE_QUERY_FAILED
//! - ITEMDB_STORAGE_LOCK_POISONED
//! - ITEMDB_STORAGE_IO_ERROR
//!
//! Every variant is fatal to the request that hit it, never to the process.

use std::io;

use thiserror::Error;

/// Errors raised while talking to the SQLite store
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database file could not be opened
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement could not be prepared or executed
    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A previous holder of the connection panicked
    #[error("database connection lock poisoned")]
    LockPoisoned,

    /// Filesystem failure while preparing the database location
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Wrap a rusqlite failure with the operation that produced it
    pub fn query(context: &'static str, source: rusqlite::Error) -> Self {
        Self::Query { context, source }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::Open { .. } => "ITEMDB_STORAGE_OPEN_FAILED",
            StorageError::Query { .. } => "ITEMDB_STORAGE_QUERY_FAILED",
            StorageError::LockPoisoned => "ITEMDB_STORAGE_LOCK_POISONED",
            StorageError::Io(_) => "ITEMDB_STORAGE_IO_ERROR",
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StorageError::LockPoisoned.code(), "ITEMDB_STORAGE_LOCK_POISONED");
        let err = StorageError::query("insert item", rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.code(), "ITEMDB_STORAGE_QUERY_FAILED");
    }

    #[test]
    fn test_display_carries_context() {
        let err = StorageError::query("list items", rusqlite::Error::QueryReturnedNoRows);
        let display = err.to_string();
        assert!(display.starts_with("list items:"));
    }

    #[test]
    fn test_io_conversion() {
        let err = StorageError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.code(), "ITEMDB_STORAGE_IO_ERROR");
        assert!(err.to_string().contains("denied"));
    }
}
