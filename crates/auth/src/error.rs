//! Authentication errors

use akdemia_common::error_response;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Authentication error
///
/// Login-path failures are surfaced to clients through `IntoResponse`.
/// The request gate never surfaces these; it folds them into an
/// unauthenticated outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("token is malformed")]
    MalformedToken,

    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("no identity with that email")]
    IdentityNotFound,

    #[error("credentials do not match")]
    BadCredential,

    #[error("request is not authenticated")]
    Unauthenticated,

    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    /// Signing secret is missing, not base64, or shorter than 256 bits
    #[error("signing secret rejected: {0}")]
    WeakSecret(String),

    #[error("failed to issue token: {0}")]
    TokenIssue(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::BadCredential
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::IdentityNotFound => StatusCode::NOT_FOUND,
            AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::WeakSecret(_) | AuthError::TokenIssue(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MalformedToken | AuthError::InvalidSignature => "INVALID_TOKEN",
            AuthError::Expired => "TOKEN_EXPIRED",
            AuthError::IdentityNotFound => "IDENTITY_NOT_FOUND",
            AuthError::BadCredential => "BAD_CREDENTIAL",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AuthError::WeakSecret(_) => "CONFIGURATION_ERROR",
            AuthError::TokenIssue(_) => "TOKEN_ISSUE_FAILED",
        }
    }

    /// Client-facing message; internal details stay in the logs
    fn public_message(&self) -> &'static str {
        match self {
            AuthError::MalformedToken | AuthError::InvalidSignature => "Invalid token",
            AuthError::Expired => "Token has expired",
            AuthError::IdentityNotFound => "User not found",
            AuthError::BadCredential => "Invalid email or password",
            AuthError::Unauthenticated => "Authentication required",
            AuthError::StoreUnavailable(_) => "Credential store unavailable",
            AuthError::WeakSecret(_) | AuthError::TokenIssue(_) => "Authentication failed",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "Authentication internal error")
            }
            StatusCode::SERVICE_UNAVAILABLE => {
                tracing::warn!(error = %self, "Authentication dependency unavailable")
            }
            _ => {}
        }

        error_response(status, self.error_code(), self.public_message())
    }
}
