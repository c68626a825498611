//! HTTP routes, one module per resource.

pub mod customers;
pub mod invoices;
pub mod medicines;
pub mod stats;
pub mod suppliers;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Every `/api` route.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(medicines::routes())
        .merge(suppliers::routes())
        .merge(customers::routes())
        .merge(invoices::routes())
        .merge(stats::routes())
}

/// `GET /health`
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
