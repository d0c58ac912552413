use axum::extract::{Path, State};

use crate::api::{ApiResponse, Payload};
use crate::error::ApiError;
use crate::handlers::crud;
use crate::models::{Expense, ExpensePatch};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<ExpensePatch>,
) -> Result<ApiResponse<Expense>, ApiError> {
    let record = crud::create_record(&state.expenses(), payload.into_record()).await?;
    Ok(ApiResponse::created(record))
}

pub async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Expense>>, ApiError> {
    let records = crud::list_records(&state.expenses()).await?;
    Ok(ApiResponse::success(records))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Expense>, ApiError> {
    let record = crud::fetch_record(&state.expenses(), &id).await?;
    Ok(ApiResponse::success(record))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<ExpensePatch>,
) -> Result<ApiResponse<Expense>, ApiError> {
    let record = crud::update_record(&state.expenses(), &id, |e| e.apply(payload)).await?;
    Ok(ApiResponse::success(record))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    crud::delete_record(&state.expenses(), &id).await?;
    Ok(ApiResponse::<()>::no_content())
}
