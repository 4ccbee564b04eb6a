//! Wire envelope and JSON response encoding
//!
//! Every endpoint answers with `{"success": bool, "data"?: .., "error"?: ..}`
//! and `Content-Type: application/json; charset=utf-8`. serde_json leaves
//! non-ASCII characters and `/` unescaped.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Uniform response envelope
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    /// Success carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    /// Bare success with no `data` key
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Failure carrying a client-facing message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body emitted when the intended payload itself cannot be encoded
#[derive(Serialize)]
struct EncodeFailure<'a> {
    success: bool,
    error: &'a str,
    message: String,
}

/// A status code plus a value serialized as UTF-8 JSON
#[derive(Debug)]
pub struct JsonResponse<T: Serialize> {
    pub status: StatusCode,
    pub body: T,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self { status, body }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        let (status, bytes) = match serde_json::to_vec(&self.body) {
            Ok(bytes) => (self.status, bytes),
            Err(e) => {
                error!(error = %e, "failed to encode response body");
                let fallback = EncodeFailure {
                    success: false,
                    error: "failed to encode JSON",
                    message: e.to_string(),
                };
                let bytes = serde_json::to_vec(&fallback).unwrap_or_else(|_| {
                    br#"{"success":false,"error":"failed to encode JSON"}"#.to_vec()
                });
                (StatusCode::INTERNAL_SERVER_ERROR, bytes)
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response()
    }
}
