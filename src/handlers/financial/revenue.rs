use axum::extract::{Path, State};

use crate::api::{ApiResponse, Payload};
use crate::error::ApiError;
use crate::handlers::crud;
use crate::models::{Revenue, RevenuePatch};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<RevenuePatch>,
) -> Result<ApiResponse<Revenue>, ApiError> {
    let record = crud::create_record(&state.revenues(), payload.into_record()).await?;
    Ok(ApiResponse::created(record))
}

pub async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Revenue>>, ApiError> {
    let records = crud::list_records(&state.revenues()).await?;
    Ok(ApiResponse::success(records))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Revenue>, ApiError> {
    let record = crud::fetch_record(&state.revenues(), &id).await?;
    Ok(ApiResponse::success(record))
}

/// All revenue entries for one patient; exact id match, may be empty.
pub async fn list_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<ApiResponse<Vec<Revenue>>, ApiError> {
    let records = state
        .revenues()
        .find_all(|r| r.patient_id == patient_id)
        .await?;
    Ok(ApiResponse::success(records))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<RevenuePatch>,
) -> Result<ApiResponse<Revenue>, ApiError> {
    let record = crud::update_record(&state.revenues(), &id, |r| r.apply(payload)).await?;
    Ok(ApiResponse::success(record))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    crud::delete_record(&state.revenues(), &id).await?;
    Ok(ApiResponse::<()>::no_content())
}
