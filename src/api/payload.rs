use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON request body extractor whose rejection maps to a 400 [`ApiError`]
/// instead of axum's default 422, so malformed bodies and validation
/// failures share one error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Payload<T>(pub T);
