//! Application layer
//!
//! Validates request payloads and turns storage outcomes into
//! [`ControllerResult`]s. The HTTP layer maps those onto status codes and
//! the wire envelope.

mod errors;
mod item_controller;
mod payload;

pub use errors::{ControllerError, ControllerResult, PayloadError};
pub use item_controller::{ItemController, ItemFields, ItemInput};
pub use payload::{is_json_content_type, parse_integer, ParsedPayload};
