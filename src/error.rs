// HTTP API Error Types
use axum::{
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::services::ServiceError;
use crate::validator::ValidationErrors;

pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";
pub const REQUEST_TIMEOUT_MESSAGE: &str = "the server took too long to process your request";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (malformed JSON, bad path or query parameters)
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed(Method),

    // 408 Request Timeout (whole-request deadline elapsed)
    RequestTimeout,

    // 422 Unprocessable Entity (well-formed input failing record validation)
    UnprocessableEntity(ValidationErrors),

    // 500 Internal Server Error; the detail is logged, never returned
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the `{"error": ...}` envelope
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => json!({ "error": msg }),
            ApiError::MethodNotAllowed(method) => json!({
                "error": format!("the {} method is not supported for this resource", method)
            }),
            ApiError::RequestTimeout => json!({ "error": REQUEST_TIMEOUT_MESSAGE }),
            ApiError::UnprocessableEntity(field_errors) => json!({ "error": field_errors }),
            ApiError::InternalServerError(_) => json!({ "error": SERVER_ERROR_MESSAGE }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    pub fn method_not_allowed(method: Method) -> Self {
        ApiError::MethodNotAllowed(method)
    }

    pub fn failed_validation(field_errors: ValidationErrors) -> Self {
        ApiError::UnprocessableEntity(field_errors)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::InternalServerError(detail.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(field_errors) => ApiError::failed_validation(field_errors),
            ServiceError::NotFound(_) => ApiError::not_found(),
            // Don't expose storage errors to clients
            ServiceError::Persistence(e) => ApiError::internal(e.to_string()),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::MethodNotAllowed(method) => write!(f, "method {} not allowed", method),
            ApiError::RequestTimeout => write!(f, "{}", REQUEST_TIMEOUT_MESSAGE),
            ApiError::UnprocessableEntity(errors) => write!(f, "validation failed: {:?}", errors),
            ApiError::InternalServerError(detail) => write!(f, "internal error: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::InternalServerError(detail) = &self {
            tracing::error!("{}", detail);
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseError;
    use std::collections::BTreeMap;

    #[test]
    fn method_not_allowed_names_the_method() {
        let err = ApiError::method_not_allowed(Method::PUT);
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            err.to_json(),
            json!({"error": "the PUT method is not supported for this resource"})
        );
    }

    #[test]
    fn validation_errors_are_returned_as_a_map() {
        let mut errors = BTreeMap::new();
        errors.insert("problem number".to_string(), "problem number must be greater than 0".to_string());
        let err: ApiError = ServiceError::Validation(errors).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_json(),
            json!({"error": {"problem number": "problem number must be greater than 0"}})
        );
    }

    #[test]
    fn persistence_detail_is_hidden() {
        let err: ApiError = ServiceError::Persistence(DatabaseError::ConfigMissing("DATABASE_URL")).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.to_json().to_string();
        assert!(!body.contains("DATABASE_URL"));
        assert_eq!(err.to_json(), json!({"error": SERVER_ERROR_MESSAGE}));
    }

    #[test]
    fn not_found_uses_generic_message() {
        let err: ApiError = ServiceError::NotFound(999).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_json(), json!({"error": NOT_FOUND_MESSAGE}));
    }
}
