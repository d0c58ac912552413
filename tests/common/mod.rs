#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use dental_api_rust::routes::app;
use dental_api_rust::state::AppState;
use dental_api_rust::store::MemoryStore;

/// Full application router over a fresh in-memory store. Each call gives an
/// isolated dataset, so suites never see each other's records.
pub fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new()), ""))
}

/// Drive one request through the router and decode the JSON body.
/// Empty bodies (204) come back as `Value::Null`.
pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let raw = body.map(|json| json.to_string());
    request_raw(app, method, path, raw.as_deref()).await
}

/// Same as [`request`] but with a raw body, for malformed-JSON cases.
pub async fn request_raw(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(raw) => builder
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
