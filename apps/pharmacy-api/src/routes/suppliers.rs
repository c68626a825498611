//! Suppliers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pharmacy_core::validation::validate_new_supplier;
use pharmacy_core::{NewSupplier, Supplier};
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/suppliers", get(list_suppliers).post(create_supplier))
}

// GET /api/suppliers
#[instrument(skip(state))]
async fn list_suppliers(State(state): State<AppState>) -> ApiResult<Json<Vec<Supplier>>> {
    Ok(Json(state.db().suppliers().list().await?))
}

// POST /api/suppliers
#[instrument(skip(state, payload))]
async fn create_supplier(
    State(state): State<AppState>,
    payload: Result<Json<NewSupplier>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    let Json(supplier) = payload?;
    validate_new_supplier(&supplier)?;

    let created = state.db().suppliers().create(&supplier).await?;
    info!(id = created.id, name = %created.name, "Supplier created");
    Ok((StatusCode::CREATED, Json(created)))
}
