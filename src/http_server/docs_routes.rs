//! Health and endpoint listing routes

use axum::{routing::get, Router};
use serde::Serialize;

use super::envelope::JsonResponse;
use super::errors::method_not_allowed;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// One row of the endpoint listing
#[derive(Debug, Clone, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub message: &'static str,
    pub endpoints: Vec<EndpointDoc>,
}

/// Endpoints served by the item routes
pub fn endpoint_docs() -> Vec<EndpointDoc> {
    vec![
        EndpointDoc {
            method: "GET",
            path: "/read_item",
            description: "List all items, most recent first",
        },
        EndpointDoc {
            method: "POST",
            path: "/create_item",
            description: "Create an item (fields: name, description)",
        },
        EndpointDoc {
            method: "POST|PUT",
            path: "/update_item",
            description: "Update an existing item (fields: id, name, description)",
        },
        EndpointDoc {
            method: "POST|DELETE",
            path: "/delete_item",
            description: "Delete an item (field: id)",
        },
        EndpointDoc {
            method: "GET",
            path: "/find_item",
            description: "Fetch one item (query: id)",
        },
    ]
}

/// Create docs and health routes
pub fn docs_routes() -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .route("/docs", get(docs_handler).fallback(method_not_allowed))
}

async fn health_handler() -> JsonResponse<HealthResponse> {
    JsonResponse::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn docs_handler() -> JsonResponse<DocsResponse> {
    JsonResponse::ok(DocsResponse {
        message: "itemdb - item CRUD API",
        endpoints: endpoint_docs(),
    })
}
