use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::Deserialize;

use crate::app::AppState;
use crate::database::Problem;
use crate::error::ApiError;
use crate::middleware::{ApiResult, Envelope};
use crate::services::DueOffset;

/// Body of POST /addproblem. Missing numbers default to 0, unknown fields are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddProblemInput {
    pub problem_number: i32,
    pub problem_name: String,
    pub due_days: i32,
    pub due_months: i32,
    pub due_years: i32,
}

impl AddProblemInput {
    pub fn offset(&self) -> DueOffset {
        DueOffset::new(self.due_years, self.due_months, self.due_days)
    }
}

/// POST /addproblem - create a problem or record another solve of it
pub async fn problem_add(
    State(state): State<AppState>,
    payload: Result<Json<AddProblemInput>, JsonRejection>,
) -> ApiResult<Problem> {
    let Json(input) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let problem = state
        .problems
        .create_or_resolve(input.problem_number, &input.problem_name, input.offset())
        .await?;

    Ok(Envelope::new("problem_added", problem))
}
