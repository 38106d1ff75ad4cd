use axum::extract::State;

use crate::app::AppState;
use crate::database::Problem;
use crate::middleware::{ApiResult, Envelope};

/// GET /problems - every stored problem, storage order
pub async fn problem_list(State(state): State<AppState>) -> ApiResult<Vec<Problem>> {
    let problems = state.problems.list().await?;
    tracing::debug!("Listing {} problems", problems.len());
    Ok(Envelope::new("problem", problems))
}
