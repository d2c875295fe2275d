//! Route definitions for Users domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::auth;
use super::middleware::UsersState;

/// Create all Users domain API routes
pub fn routes() -> Router<UsersState> {
    Router::new()
        .route("/users/generateToken", post(auth::generate_token))
        .route("/users/me", get(auth::me))
}
