// handlers/health.rs - GET /healthcheck handler

use axum::extract::State;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::middleware::Envelope;

/// GET /healthcheck - liveness plus the running version
pub async fn healthcheck(State(state): State<AppState>) -> Envelope<Value> {
    Envelope::new(
        "system_info",
        json!({
            "status": "available",
            "version": state.config.server.version,
        }),
    )
}
