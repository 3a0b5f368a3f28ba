//! Error types for the HTTP boundary

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use slow_sort::SortError;
use thiserror::Error;
use tracing::debug;

/// Failures surfaced to HTTP clients
///
/// Every variant maps to 500; the boundary does not distinguish a
/// cancellation from any other sort failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read request body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to sort numbers: {0}")]
    Sort(#[from] SortError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Decode(_) => {
                debug!(error = %self, "rejecting request");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ServiceError::Sort(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
