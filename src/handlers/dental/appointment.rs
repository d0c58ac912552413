use axum::extract::{Path, State};

use crate::api::{ApiResponse, Payload};
use crate::error::ApiError;
use crate::handlers::crud;
use crate::models::{Appointment, AppointmentPatch};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<AppointmentPatch>,
) -> Result<ApiResponse<Appointment>, ApiError> {
    let record = crud::create_record(&state.appointments(), payload.into_record()).await?;
    Ok(ApiResponse::created(record))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Appointment>>, ApiError> {
    let records = crud::list_records(&state.appointments()).await?;
    Ok(ApiResponse::success(records))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Appointment>, ApiError> {
    let record = crud::fetch_record(&state.appointments(), &id).await?;
    Ok(ApiResponse::success(record))
}

/// All appointments for one patient; exact id match, may be empty.
pub async fn list_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<ApiResponse<Vec<Appointment>>, ApiError> {
    let records = state
        .appointments()
        .find_all(|a| a.patient_id == patient_id)
        .await?;
    Ok(ApiResponse::success(records))
}

/// All appointments for one dentist; exact id match, may be empty.
pub async fn list_by_dentist(
    State(state): State<AppState>,
    Path(dentist_id): Path<String>,
) -> Result<ApiResponse<Vec<Appointment>>, ApiError> {
    let records = state
        .appointments()
        .find_all(|a| a.dentist_id == dentist_id)
        .await?;
    Ok(ApiResponse::success(records))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<AppointmentPatch>,
) -> Result<ApiResponse<Appointment>, ApiError> {
    let record = crud::update_record(&state.appointments(), &id, |a| a.apply(payload)).await?;
    Ok(ApiResponse::success(record))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    crud::delete_record(&state.appointments(), &id).await?;
    Ok(ApiResponse::<()>::no_content())
}
