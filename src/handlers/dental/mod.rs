pub mod appointment;
pub mod dentist;
pub mod patient;
pub mod procedure;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Routes for the clinical module, mounted under `/api/v1/dental`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dentist", get(dentist::list).post(dentist::create))
        .route(
            "/dentist/:id",
            get(dentist::fetch).put(dentist::update).delete(dentist::remove),
        )
        .route("/dentist/name/:name", get(dentist::search_by_name))
        .route("/dentist/cro/:cro", get(dentist::fetch_by_cro))
        .route("/patient", get(patient::list).post(patient::create))
        .route(
            "/patient/:id",
            get(patient::fetch).put(patient::update).delete(patient::remove),
        )
        .route("/patient/name/:name", get(patient::search_by_name))
        .route("/procedure", get(procedure::list).post(procedure::create))
        .route(
            "/procedure/:id",
            get(procedure::fetch)
                .put(procedure::update)
                .delete(procedure::remove),
        )
        .route("/procedure/name/:name", get(procedure::search_by_name))
        .route(
            "/appointment",
            get(appointment::list).post(appointment::create),
        )
        .route(
            "/appointment/:id",
            get(appointment::fetch)
                .put(appointment::update)
                .delete(appointment::remove),
        )
        .route(
            "/appointment/patient/:patient_id",
            get(appointment::list_by_patient),
        )
        .route(
            "/appointment/dentist/:dentist_id",
            get(appointment::list_by_dentist),
        )
}
