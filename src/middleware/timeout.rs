use tower::{timeout::error::Elapsed, BoxError};

use crate::error::ApiError;

/// Error handler for the request deadline layer. Elapsed deadlines get the 408
/// envelope; anything else the stack surfaces is an opaque 500.
pub async fn handle_timeout(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("request exceeded its deadline");
        ApiError::RequestTimeout
    } else {
        ApiError::internal(format!("unhandled middleware error: {}", err))
    }
}
