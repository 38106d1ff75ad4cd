use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResult, Envelope};

use super::utils::parse_problem_number;

/// DELETE /problems/:id - remove a problem; 404 when no row matched
pub async fn problem_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let problem_number = parse_problem_number(&id)?;

    if !state.problems.delete(problem_number).await? {
        return Err(ApiError::not_found());
    }

    Ok(Envelope::new(
        "problem_deleted",
        json!({ "problem_number": problem_number }),
    ))
}
