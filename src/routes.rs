use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::ApiResponse;
use crate::config::config;
use crate::error::ApiError;
use crate::handlers::{dental, financial};
use crate::state::AppState;

/// Assemble the full application router. Kept out of `main` so the test
/// suites can drive the same router in-process against an in-memory store.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/v1", get(version))
        .nest("/api/v1/dental", dental::router())
        .nest("/api/v1/financial", financial::router())
        .with_state(state);

    let api = &config().api;
    if api.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if api.enable_request_tracing {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Liveness plus a store reachability probe; 503 when the store is down.
async fn health(State(state): State<AppState>) -> Result<ApiResponse<Value>, ApiError> {
    if let Err(e) = state.store().ping().await {
        tracing::error!("health check failed: {}", e);
        return Err(ApiError::service_unavailable("store unreachable"));
    }
    Ok(ApiResponse::success(json!({ "status": "healthy" })))
}

async fn version() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "modules": ["dental", "financial"],
    }))
}
