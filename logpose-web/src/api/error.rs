//! API error type and its JSON response mapping
//!
//! Every error body is `{"error": "<message>"}`. Internal failures are
//! logged with their cause and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error (500); `message` is what the client sees
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: logpose_common::Error,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, source: logpose_common::Error) -> Self {
        ApiError::Internal { message, source }
    }

    /// Map a library error, using `message` when it turns into a 500
    pub fn from_common(err: logpose_common::Error, message: &'static str) -> Self {
        match err {
            logpose_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            logpose_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::internal(message, other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg,
            ApiError::Internal { message, source } => {
                error!("{}: {}", message, source);
                message.to_string()
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
