use axum::extract::{rejection::QueryRejection, Query, State};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::app::AppState;
use crate::database::Problem;
use crate::error::ApiError;
use crate::middleware::{ApiResult, Envelope};
use crate::services::{start_of_day, start_of_today};

#[derive(Debug, Default, Deserialize)]
pub struct DueQuery {
    /// `YYYY-MM-DD`; defaults to today.
    pub from: Option<NaiveDate>,
}

/// GET /dueproblems - problems due on or after the start of `from` (today by default)
pub async fn problem_due(
    State(state): State<AppState>,
    query: Result<Query<DueQuery>, QueryRejection>,
) -> ApiResult<Vec<Problem>> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let cutoff = match query.from {
        Some(date) => start_of_day(date),
        None => start_of_today(),
    };

    let problems = state.problems.list_due_on_or_after(cutoff).await?;
    Ok(Envelope::new("problem", problems))
}
