use axum::extract::{Path, State};

use crate::api::{ApiResponse, Payload};
use crate::error::ApiError;
use crate::handlers::crud;
use crate::models::{Procedure, ProcedurePatch};
use crate::state::AppState;
use crate::store::filter::contains_ignore_case;

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<ProcedurePatch>,
) -> Result<ApiResponse<Procedure>, ApiError> {
    let record = crud::create_record(&state.procedures(), payload.into_record()).await?;
    Ok(ApiResponse::created(record))
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Procedure>>, ApiError> {
    let records = crud::list_records(&state.procedures()).await?;
    Ok(ApiResponse::success(records))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Procedure>, ApiError> {
    let record = crud::fetch_record(&state.procedures(), &id).await?;
    Ok(ApiResponse::success(record))
}

pub async fn search_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiResponse<Vec<Procedure>>, ApiError> {
    let records = state
        .procedures()
        .find_all(|p| contains_ignore_case(&p.name, &name))
        .await?;
    Ok(ApiResponse::success(records))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<ProcedurePatch>,
) -> Result<ApiResponse<Procedure>, ApiError> {
    let record = crud::update_record(&state.procedures(), &id, |p| p.apply(payload)).await?;
    Ok(ApiResponse::success(record))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    crud::delete_record(&state.procedures(), &id).await?;
    Ok(ApiResponse::<()>::no_content())
}
