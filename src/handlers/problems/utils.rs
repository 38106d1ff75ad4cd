use crate::error::ApiError;

/// Parse the `:id` path segment as a positive problem number.
pub fn parse_problem_number(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::bad_request("invalid id parameter")),
    }
}
