use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::DiarioError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<DiarioError> for ApiError {
    fn from(err: DiarioError) -> Self {
        let message = err.to_string();
        match err {
            DiarioError::MissingFile { .. }
            | DiarioError::MissingColumns { .. }
            | DiarioError::Spreadsheet { .. } => {
                tracing::error!("Configuration error: {}", message);
                Self::internal_server_error(message)
            }
            DiarioError::AuthFailure => Self::unauthorized(message),
            DiarioError::NotConfigured { .. } | DiarioError::NotFound(_) => {
                Self::not_found(message)
            }
            DiarioError::Validation(_) => Self::bad_request(message),
            DiarioError::Conflict { .. } => Self::conflict(message),
            DiarioError::Io(_) => {
                tracing::error!("I/O error: {}", message);
                Self::internal_server_error(message)
            }
        }
    }
}
