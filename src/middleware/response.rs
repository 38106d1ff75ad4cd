use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Wrapper for API responses that places the payload under a single key,
/// e.g. `{"problem": [...]}`.
#[derive(Debug)]
pub struct Envelope<T: Serialize> {
    pub key: &'static str,
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> Envelope<T> {
    /// Create an enveloped response with default 200 status
    pub fn new(key: &'static str, data: T) -> Self {
        Self::with_status(key, data, StatusCode::OK)
    }

    pub fn with_status(key: &'static str, data: T, status_code: StatusCode) -> Self {
        Self {
            key,
            data,
            status_code,
        }
    }

    /// The JSON body this envelope renders to.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut body = Map::new();
        body.insert(self.key.to_string(), serde_json::to_value(&self.data)?);
        Ok(Value::Object(body))
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        match self.to_json() {
            Ok(body) => (self.status_code, Json(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": crate::error::SERVER_ERROR_MESSAGE
                    })),
                )
                    .into_response()
            }
        }
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<Envelope<T>, crate::error::ApiError>;
