//! Credential verification for the login path

use std::sync::Arc;
use std::time::Duration;

use akdemia_common::verify_password;

use crate::error::AuthError;
use crate::store::{bounded, CredentialStore, StoreError};
use crate::types::AuthResult;

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::StoreUnavailable(err.to_string())
    }
}

/// Verifies an email/password pair against the credential store.
///
/// No retry, backoff or rate limiting happens here.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    lookup_timeout: Duration,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, lookup_timeout: Duration) -> Self {
        Self {
            store,
            lookup_timeout,
        }
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let identity = bounded(self.lookup_timeout, self.store.find_identity_by_email(email))
            .await?
            .ok_or_else(|| {
                tracing::debug!("Login for unknown identity");
                AuthError::IdentityNotFound
            })?;

        if !verify_password(password, &identity.password_hash) {
            tracing::info!(user_id = identity.id, "Login rejected: bad credential");
            return Err(AuthError::BadCredential);
        }

        let authorities =
            bounded(self.lookup_timeout, self.store.load_authorities(&identity.email)).await?;

        tracing::info!(user_id = identity.id, "Login succeeded");

        Ok(AuthResult {
            identity: identity.public(),
            authorities,
        })
    }
}
