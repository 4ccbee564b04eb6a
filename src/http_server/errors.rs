//! # HTTP API Errors
//!
//! Every failure a handler can report, with its status code and the message
//! the client sees.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use super::envelope::{Envelope, JsonResponse};
use crate::controller::{ControllerError, PayloadError};

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Verb not supported by the endpoint
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Body did not decode into a key/value mapping
    #[error("invalid payload")]
    InvalidPayload(#[source] PayloadError),

    /// Missing or non-numeric `id`
    #[error("id not provided")]
    IdNotProvided,

    /// Controller refused the request (validation or not-found)
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage failed underneath the controller
    #[error("internal server error")]
    Internal(#[source] ControllerError),
}

impl ApiError {
    /// Map a controller outcome onto HTTP.
    ///
    /// `not_found` is the status used for not-found outcomes, which differs
    /// per endpoint (update reports 400, delete and find report 404).
    pub fn from_controller(err: ControllerError, not_found: StatusCode) -> Self {
        match err {
            ControllerError::Validation(_) => ApiError::Rejected {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ControllerError::NotFound | ControllerError::NotFoundOrUnchanged => {
                ApiError::Rejected {
                    status: not_found,
                    message: err.to_string(),
                }
            }
            ControllerError::Storage(_) => ApiError::Internal(err),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::IdNotProvided => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Internal(source) => error!(error = %source, "request failed"),
            ApiError::InvalidPayload(source) => warn!(error = %source, "invalid payload"),
            _ => warn!(status = status.as_u16(), reason = %self, "request rejected"),
        }

        JsonResponse::new(status, Envelope::failure(self.to_string())).into_response()
    }
}

/// Fallback for verbs an endpoint does not accept
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
