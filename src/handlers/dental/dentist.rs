use axum::extract::{Path, State};

use crate::api::{ApiResponse, Payload};
use crate::error::ApiError;
use crate::handlers::crud;
use crate::models::{Dentist, DentistPatch};
use crate::state::AppState;
use crate::store::filter::{contains_ignore_case, eq_ignore_case};

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<DentistPatch>,
) -> Result<ApiResponse<Dentist>, ApiError> {
    let record = crud::create_record(&state.dentists(), payload.into_record()).await?;
    Ok(ApiResponse::created(record))
}

pub async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Dentist>>, ApiError> {
    let records = crud::list_records(&state.dentists()).await?;
    Ok(ApiResponse::success(records))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Dentist>, ApiError> {
    let record = crud::fetch_record(&state.dentists(), &id).await?;
    Ok(ApiResponse::success(record))
}

/// Case-insensitive substring search; an empty list is a normal 200.
pub async fn search_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiResponse<Vec<Dentist>>, ApiError> {
    let records = state
        .dentists()
        .find_all(|d| contains_ignore_case(&d.name, &name))
        .await?;
    Ok(ApiResponse::success(records))
}

/// Exact CRO lookup; 404 when no dentist carries the code.
pub async fn fetch_by_cro(
    State(state): State<AppState>,
    Path(cro): Path<String>,
) -> Result<ApiResponse<Dentist>, ApiError> {
    let record = state
        .dentists()
        .find_first(|d| eq_ignore_case(&d.cro, &cro))
        .await?;
    Ok(ApiResponse::success(record))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<DentistPatch>,
) -> Result<ApiResponse<Dentist>, ApiError> {
    let record = crud::update_record(&state.dentists(), &id, |d| d.apply(payload)).await?;
    Ok(ApiResponse::success(record))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    crud::delete_record(&state.dentists(), &id).await?;
    Ok(ApiResponse::<()>::no_content())
}
