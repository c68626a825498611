//! Billing: create an invoice, browse past ones.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pharmacy_core::{CreateInvoiceRequest, Invoice, InvoiceDetails};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Invoices returned by a list call when no limit is given.
const DEFAULT_LIST_LIMIT: u32 = 500;

/// Upper bound on `?limit=`.
const MAX_LIST_LIMIT: u32 = 5_000;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/invoices", get(list_invoices).post(create_invoice))
        .route("/api/invoices/{id}", get(get_invoice))
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceListQuery {
    pub limit: Option<u32>,
}

impl InvoiceListQuery {
    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
    }
}

// POST /api/invoices
#[instrument(skip(state, payload))]
async fn create_invoice(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Invoice>)> {
    let Json(request) = payload?;
    let invoice = state.assembler().create_invoice(&request).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/invoices
#[instrument(skip(state, query))]
async fn list_invoices(
    State(state): State<AppState>,
    query: Result<Query<InvoiceListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Invoice>>> {
    let Query(query) = query?;
    Ok(Json(state.db().invoices().list(query.limit()).await?))
}

// GET /api/invoices/{id}
#[instrument(skip(state))]
async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<InvoiceDetails>> {
    let details = state
        .db()
        .invoices()
        .details(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Invoice not found: {id}")))?;
    Ok(Json(details))
}
