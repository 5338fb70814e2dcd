use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream service answered, but with a non-OK status string.
    #[error("{service} API returned: {status}")]
    UpstreamStatus { service: &'static str, status: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{service} API timed out after {timeout_ms}ms")]
    Timeout { service: &'static str, timeout_ms: u64 },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Statuses that mean "nothing matched" rather than "the service failed"
    fn is_not_found_status(status: &str) -> bool {
        matches!(status, "ZERO_RESULTS" | "NOT_FOUND")
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamStatus { ref status, .. } if Self::is_not_found_status(status) => {
                tracing::info!("Upstream returned no results: {}", message);
                StatusCode::NOT_FOUND
            }
            AppError::UpstreamStatus { .. } => {
                tracing::warn!("Upstream status error: {}", message);
                StatusCode::BAD_GATEWAY
            }
            AppError::Transport(ref e) => {
                tracing::error!("Transport error: {}", e);
                StatusCode::BAD_GATEWAY
            }
            AppError::Timeout { .. } => {
                tracing::warn!("{}", message);
                StatusCode::GATEWAY_TIMEOUT
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
