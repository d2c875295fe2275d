//! Token login and introspection handlers
//!
//! Implements:
//! - POST /users/generateToken — Exchange email + password for a bearer token
//! - GET /users/me — Return the principal attached by the authentication gate

use akdemia_auth::{AuthBackend, AuthError, CurrentPrincipal};
use akdemia_common::ValidatedJson;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response shape for `GET /users/me`
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

/// POST /users/generateToken
pub async fn generate_token(
    State(auth): State<AuthBackend>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let token = auth.login(&request.email, &request.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /users/me
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Json<MeResponse> {
    Json(MeResponse {
        id: principal.id(),
        email: principal.email().to_string(),
        roles: principal.authorities.iter().cloned().collect(),
    })
}
