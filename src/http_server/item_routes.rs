//! Item HTTP Routes
//!
//! One handler per operation. Each handler decodes the body once, pulls out
//! the `id` where needed, calls the [`ItemController`] and maps its result
//! onto a status code and envelope.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tracing::info;

use super::envelope::{Envelope, JsonResponse};
use super::errors::{method_not_allowed, ApiError, ApiResult};
use crate::controller::{is_json_content_type, ItemController, ItemFields, ParsedPayload};
use crate::storage::{Item, ItemId};

// ==================
// Shared State
// ==================

/// Item state shared across handlers
pub struct ItemState {
    pub controller: ItemController,
}

impl ItemState {
    pub fn new(controller: ItemController) -> Self {
        Self { controller }
    }
}

// ==================
// Item Routes
// ==================

/// Create item routes
pub fn item_routes(state: Arc<ItemState>) -> Router {
    Router::new()
        .route(
            "/create_item",
            post(create_item_handler).fallback(method_not_allowed),
        )
        .route(
            "/read_item",
            get(list_items_handler).fallback(method_not_allowed),
        )
        .route(
            "/update_item",
            post(update_item_handler)
                .put(update_item_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/delete_item",
            post(delete_item_handler)
                .delete(delete_item_handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/find_item",
            get(find_item_handler).fallback(method_not_allowed),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

fn decode_payload(headers: &HeaderMap, body: &[u8]) -> ApiResult<ParsedPayload> {
    ParsedPayload::decode(content_type(headers), body).map_err(ApiError::InvalidPayload)
}

/// `id` from a raw query string such as `id=3&x=y`
fn query_id(query: Option<&str>) -> Option<ItemId> {
    ParsedPayload::from_form(query?.as_bytes())
        .ok()?
        .integer("id")
}

// ==================
// Handlers
// ==================

async fn create_item_handler(
    State(state): State<Arc<ItemState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<JsonResponse<Envelope<ItemFields>>> {
    let payload = decode_payload(&headers, &body)?;

    let created = state
        .controller
        .create(&payload)
        .map_err(|e| ApiError::from_controller(e, StatusCode::BAD_REQUEST))?;

    info!(id = created.id, "item created");
    Ok(JsonResponse::new(StatusCode::CREATED, Envelope::ok(created)))
}

async fn list_items_handler(
    State(state): State<Arc<ItemState>>,
) -> ApiResult<JsonResponse<Envelope<Vec<Item>>>> {
    let items = state
        .controller
        .list()
        .map_err(|e| ApiError::from_controller(e, StatusCode::NOT_FOUND))?;

    Ok(JsonResponse::ok(Envelope::ok(items)))
}

/// POST and PUT share this handler. A PUT form body is read from the raw
/// body exactly like a POST one.
async fn update_item_handler(
    State(state): State<Arc<ItemState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<JsonResponse<Envelope<ItemFields>>> {
    let payload = decode_payload(&headers, &body)?;
    let id = payload.integer("id").ok_or(ApiError::IdNotProvided)?;

    let updated = state
        .controller
        .update(id, &payload)
        .map_err(|e| ApiError::from_controller(e, StatusCode::BAD_REQUEST))?;

    info!(id, "item updated");
    Ok(JsonResponse::ok(Envelope::ok(updated)))
}

/// POST reads `id` from a JSON or form body; DELETE reads it from the
/// query string. A body that fails to decode, or an id of zero, counts as
/// no id at all.
async fn delete_item_handler(
    State(state): State<Arc<ItemState>>,
    method: Method,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> ApiResult<JsonResponse<Envelope<()>>> {
    let id = if method == Method::DELETE {
        query_id(query.as_deref())
    } else if is_json_content_type(content_type(&headers)) {
        ParsedPayload::from_json(&body).ok().and_then(|p| p.integer("id"))
    } else {
        ParsedPayload::from_form(&body).ok().and_then(|p| p.integer("id"))
    };
    let id = id.filter(|id| *id != 0).ok_or(ApiError::IdNotProvided)?;

    state
        .controller
        .delete(id)
        .map_err(|e| ApiError::from_controller(e, StatusCode::NOT_FOUND))?;

    info!(id, "item deleted");
    Ok(JsonResponse::ok(Envelope::empty()))
}

async fn find_item_handler(
    State(state): State<Arc<ItemState>>,
    RawQuery(query): RawQuery,
) -> ApiResult<JsonResponse<Envelope<Item>>> {
    let id = query_id(query.as_deref()).ok_or(ApiError::IdNotProvided)?;

    let item = state
        .controller
        .find(id)
        .map_err(|e| ApiError::from_controller(e, StatusCode::NOT_FOUND))?;

    Ok(JsonResponse::ok(Envelope::ok(item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_id() {
        assert_eq!(query_id(Some("id=3")), Some(3));
        assert_eq!(query_id(Some("x=1&id=12")), Some(12));
        assert_eq!(query_id(Some("id=abc")), None);
        assert_eq!(query_id(Some("")), None);
        assert_eq!(query_id(None), None);
    }

    #[test]
    fn test_content_type_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_type(&headers), None);

        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert_eq!(content_type(&headers), Some("application/json"));
    }
}
