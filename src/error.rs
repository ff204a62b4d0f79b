use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Every variant is terminal for the search call that produced it: the
/// pagination loop never recovers from an error and never returns partial
/// results alongside one.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The caller asked for zero results. Raised before any I/O.
    #[error("maxResults must be greater than zero")]
    InvalidMaxResults,

    /// The provider answered, but the body did not match the expected shape.
    #[error("Failed to parse search results: {0}")]
    ResultParsing(String),

    /// The provider reported a failure through its own protocol.
    ///
    /// `message` is the provider's text, verbatim.
    #[error("{provider} search request failed: {message}")]
    SearchProvider {
        provider: &'static str,
        message: String,
    },

    /// The request could not be sent or completed.
    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("search cancelled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        AppError::SearchProvider {
            provider,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::DeadlineExceeded
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidMaxResults | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::SearchProvider { .. } | AppError::ResultParsing(_) | AppError::Transport(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
