//! Akdemia application composition root
//!
//! Wires the credential store and auth backend, then composes domain
//! routers behind the request authentication gate.

use std::sync::Arc;

use akdemia_auth::{
    authenticate_request, AuthBackend, AuthConfig, CredentialStore, InMemoryCredentialStore,
    PgCredentialStore,
};
use akdemia_common::config::Config;
use akdemia_users::UsersState;
use axum::{middleware, routing::get, Router};
use sqlx::PgPool;

/// Create the main application router from configuration
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let store = credential_store(config).await?;
    let auth = AuthBackend::new(store, AuthConfig::from(config))
        .map_err(|e| anyhow::anyhow!("Invalid auth configuration: {}", e))?;

    Ok(build_router(auth))
}

/// Pick the credential store: Postgres when `DATABASE_URL` is set, in-memory otherwise
pub async fn credential_store(config: &Config) -> Result<Arc<dyn CredentialStore>, anyhow::Error> {
    if let Some(database_url) = &config.database_url {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
        tracing::info!("Using Postgres credential store");
        return Ok(Arc::new(PgCredentialStore::new(pool)));
    }

    let store = match &config.seed_users_file {
        Some(path) => InMemoryCredentialStore::from_seed_file(path)?,
        None => {
            tracing::warn!("No DATABASE_URL or SEED_USERS_FILE set, credential store is empty");
            InMemoryCredentialStore::new()
        }
    };
    tracing::info!(identities = store.len(), "Using in-memory credential store");

    Ok(Arc::new(store))
}

/// Compose all routes behind the authentication gate
pub fn build_router(auth: AuthBackend) -> Router {
    let users_state = UsersState { auth: auth.clone() };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Akdemia API v0.0.1-SNAPSHOT" }))
        .merge(akdemia_users::routes().with_state(users_state))
        .layer(middleware::from_fn_with_state(auth, authenticate_request))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
