//! Dashboard figures.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pharmacy_core::DashboardStats;
use tracing::instrument;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/stats", get(dashboard))
}

// GET /api/stats
#[instrument(skip(state))]
async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.db().stats().dashboard().await?))
}
