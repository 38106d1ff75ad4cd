use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::Problem;
use crate::middleware::{ApiResult, Envelope};

use super::utils::parse_problem_number;

/// GET /problems/:id - single problem by number
pub async fn problem_show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Problem> {
    let problem_number = parse_problem_number(&id)?;
    let problem = state.problems.get(problem_number).await?;
    Ok(Envelope::new("problem", problem))
}
