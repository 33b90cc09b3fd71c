use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::social::FeedResponse;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("Upstream responded with {status}")]
    Upstream { status: u16, body: String },

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured(_) => StatusCode::OK,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::ExternalService(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the feed envelope. Upstream bodies are surfaced verbatim.
    pub fn to_response(&self) -> FeedResponse {
        match self {
            Self::NotConfigured(msg) => FeedResponse::not_configured(msg.clone()),
            Self::Upstream { body, .. } => FeedResponse::failed(body.clone()),
            Self::ExternalService(msg) | Self::Internal(msg) => {
                if msg.is_empty() {
                    FeedResponse::failed(UNKNOWN_ERROR)
                } else {
                    FeedResponse::failed(msg.clone())
                }
            }
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_success() {
            tracing::info!(reason = %self, "Feed unavailable");
        } else {
            tracing::error!(
                error = %self,
                status = %status.as_u16(),
                "Request failed"
            );
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
