pub mod expense;
pub mod invoice;
pub mod revenue;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Routes for the financial module, mounted under `/api/v1/financial`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expense", get(expense::list).post(expense::create))
        .route(
            "/expense/:id",
            get(expense::fetch).put(expense::update).delete(expense::remove),
        )
        .route("/revenue", get(revenue::list).post(revenue::create))
        .route(
            "/revenue/:id",
            get(revenue::fetch).put(revenue::update).delete(revenue::remove),
        )
        .route(
            "/revenue/patient/:patient_id",
            get(revenue::list_by_patient),
        )
        .route("/invoice", get(invoice::list).post(invoice::create))
        .route(
            "/invoice/:id",
            get(invoice::fetch).put(invoice::update).delete(invoice::remove),
        )
        .route("/invoice/number/:number", get(invoice::fetch_by_number))
}
