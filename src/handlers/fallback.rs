// handlers/fallback.rs - responses for unmatched paths and methods

use axum::http::Method;

use crate::error::ApiError;

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method)
}
