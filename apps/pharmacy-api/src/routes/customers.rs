//! Customer lookup.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use pharmacy_core::validation::validate_search_query;
use pharmacy_core::Customer;
use serde::Deserialize;
use tracing::instrument;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/customers", get(list_customers))
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub search: Option<String>,
}

// GET /api/customers?search=
#[instrument(skip(state, query))]
async fn list_customers(
    State(state): State<AppState>,
    query: Result<Query<CustomerQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Customer>>> {
    let Query(query) = query?;
    let search = query
        .search
        .as_deref()
        .map(validate_search_query)
        .transpose()?;

    let customers = state.db().customers().list(search.as_deref()).await?;
    Ok(Json(customers))
}
