//! Catalog CRUD.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use pharmacy_core::validation::{
    validate_medicine_update, validate_new_medicine, validate_search_query,
};
use pharmacy_core::{Medicine, MedicineFilter, MedicineUpdate, NewMedicine, EXPIRING_SOON_DAYS};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/medicines", get(list_medicines).post(create_medicine))
        .route(
            "/api/medicines/{id}",
            get(get_medicine).put(update_medicine).delete(delete_medicine),
        )
}

/// `?search=&lowStock=true&expiring=true`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub low_stock: bool,
    #[serde(default)]
    pub expiring: bool,
}

impl MedicineQuery {
    fn into_filter(self) -> ApiResult<MedicineFilter> {
        let search = match self.search {
            Some(term) => Some(validate_search_query(&term)?).filter(|s| !s.is_empty()),
            None => None,
        };

        Ok(MedicineFilter {
            search,
            low_stock: self.low_stock,
            expiring_within_days: self.expiring.then_some(EXPIRING_SOON_DAYS),
        })
    }
}

// GET /api/medicines
#[instrument(skip(state, query))]
async fn list_medicines(
    State(state): State<AppState>,
    query: Result<Query<MedicineQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Medicine>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let medicines = state.db().medicines().list(&filter).await?;
    Ok(Json(medicines))
}

// GET /api/medicines/{id}
#[instrument(skip(state))]
async fn get_medicine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Medicine>> {
    let medicine = state
        .db()
        .medicines()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Medicine not found: {id}")))?;
    Ok(Json(medicine))
}

// POST /api/medicines
#[instrument(skip(state, payload))]
async fn create_medicine(
    State(state): State<AppState>,
    payload: Result<Json<NewMedicine>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Medicine>)> {
    let Json(medicine) = payload?;
    validate_new_medicine(&medicine)?;

    let created = state.db().medicines().create(&medicine).await?;
    info!(id = created.id, name = %created.name, "Medicine created");
    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /api/medicines/{id}
#[instrument(skip(state, payload))]
async fn update_medicine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<MedicineUpdate>, JsonRejection>,
) -> ApiResult<Json<Medicine>> {
    let Json(update) = payload?;
    validate_medicine_update(&update)?;

    let updated = state.db().medicines().update(id, &update).await?;
    Ok(Json(updated))
}

// DELETE /api/medicines/{id}
#[instrument(skip(state))]
async fn delete_medicine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db().medicines().delete(id).await?;
    info!(id, "Medicine deleted");
    Ok(StatusCode::NO_CONTENT)
}
