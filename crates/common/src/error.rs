//! Common error types and handling for Akdemia

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Akdemia application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Build the `{ "error": { "code", "message" } }` envelope shared by every error response
pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = Json(json!({
        "error": {
            "code": code,
            "message": message,
        }
    }));

    (status, body).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors with full context
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal server error");
        }

        error_response(status, self.error_code(), &self.to_string())
    }
}
