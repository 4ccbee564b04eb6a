//! # HTTP Server Module
//!
//! Transport layer for the item API. Handlers validate the method, decode
//! JSON or form bodies, and wrap every outcome in the JSON envelope.
//!
//! # Endpoints
//!
//! - `POST /create_item` - Create an item
//! - `GET /read_item` - List items
//! - `POST|PUT /update_item` - Update an item
//! - `POST|DELETE /delete_item` - Delete an item
//! - `GET /find_item?id=N` - Fetch one item
//! - `GET /docs`, `GET /health`

pub mod config;
pub mod docs_routes;
pub mod envelope;
pub mod errors;
pub mod item_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use envelope::{Envelope, JsonResponse, JSON_CONTENT_TYPE};
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
