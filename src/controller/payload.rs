//! Request payload decoding
//!
//! A request body is resolved once, from its content type, into either a JSON
//! object or a set of URL-encoded form fields. Downstream code reads fields
//! through [`ParsedPayload`] without caring which one it got.

use serde_json::{Map, Value};

use super::errors::PayloadError;

/// Decoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPayload {
    /// Body sent as `application/json`
    Json(Map<String, Value>),
    /// Body sent as URL-encoded form fields
    Form(Vec<(String, String)>),
}

/// True when a `Content-Type` header value announces JSON
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

impl ParsedPayload {
    /// Decode a raw body according to its content type.
    ///
    /// JSON bodies must decode to an object. Anything else is parsed as a
    /// URL-encoded query string; an empty body yields an empty form.
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self, PayloadError> {
        if is_json_content_type(content_type) {
            Self::from_json(body)
        } else {
            Self::from_form(body)
        }
    }

    pub fn from_json(body: &[u8]) -> Result<Self, PayloadError> {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(ParsedPayload::Json(map)),
            Ok(_) => Err(PayloadError::NotAnObject),
            Err(e) => Err(PayloadError::Json(e)),
        }
    }

    pub fn from_form(body: &[u8]) -> Result<Self, PayloadError> {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .map(ParsedPayload::Form)
            .map_err(PayloadError::Form)
    }

    /// Textual value of a field, or `None` when absent or not scalar.
    ///
    /// Numbers keep their JSON spelling, `true` reads as `"1"` and `false`
    /// as `""`. For repeated form keys the last occurrence wins.
    pub fn text(&self, key: &str) -> Option<String> {
        match self {
            ParsedPayload::Json(map) => match map.get(key)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(true) => Some("1".to_string()),
                Value::Bool(false) => Some(String::new()),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            },
            ParsedPayload::Form(fields) => fields
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
        }
    }

    /// First present field among `keys`
    pub fn text_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Integer value of a field.
    ///
    /// Accepts JSON integers and strings holding an optionally signed run of
    /// digits (surrounding whitespace ignored). Fractions, empty strings and
    /// other text do not count.
    pub fn integer(&self, key: &str) -> Option<i64> {
        if let ParsedPayload::Json(map) = self {
            if let Some(n) = map.get(key).and_then(Value::as_i64) {
                return Some(n);
            }
        }
        parse_integer(&self.text(key)?)
    }
}

/// Parse an identifier from free text such as a query-string value
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
