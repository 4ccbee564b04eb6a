//! Controller error types

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Outcome of a controller operation that did not succeed
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A required field was missing or blank
    #[error("{0}")]
    Validation(&'static str),

    /// The addressed item does not exist
    #[error("not found")]
    NotFound,

    /// Update touched no row: either the id is unknown or nothing changed
    #[error("not found or identical data")]
    NotFoundOrUnchanged,

    /// The store could not execute the statement
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ControllerError {
    /// Whether this error should abort the request as a server fault
    pub fn is_fatal(&self) -> bool {
        matches!(self, ControllerError::Storage(_))
    }
}

/// Why a request body could not be turned into a key/value mapping
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON body is not an object")]
    NotAnObject,

    #[error("malformed form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),
}
