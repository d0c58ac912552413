use axum::extract::{Path, State};

use crate::api::{ApiResponse, Payload};
use crate::error::ApiError;
use crate::handlers::crud;
use crate::models::{Invoice, InvoicePatch};
use crate::state::AppState;
use crate::store::filter::eq_ignore_case;

pub async fn create(
    State(state): State<AppState>,
    Payload(payload): Payload<InvoicePatch>,
) -> Result<ApiResponse<Invoice>, ApiError> {
    let record = crud::create_record(&state.invoices(), payload.into_record()).await?;
    Ok(ApiResponse::created(record))
}

pub async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Invoice>>, ApiError> {
    let records = crud::list_records(&state.invoices()).await?;
    Ok(ApiResponse::success(records))
}

pub async fn fetch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Invoice>, ApiError> {
    let record = crud::fetch_record(&state.invoices(), &id).await?;
    Ok(ApiResponse::success(record))
}

/// Exact invoice-number lookup; 404 when no invoice carries the number.
pub async fn fetch_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<ApiResponse<Invoice>, ApiError> {
    let record = state
        .invoices()
        .find_first(|i| eq_ignore_case(&i.number, &number))
        .await?;
    Ok(ApiResponse::success(record))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(payload): Payload<InvoicePatch>,
) -> Result<ApiResponse<Invoice>, ApiError> {
    let record = crud::update_record(&state.invoices(), &id, |i| i.apply(payload)).await?;
    Ok(ApiResponse::success(record))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    crud::delete_record(&state.invoices(), &id).await?;
    Ok(ApiResponse::<()>::no_content())
}
