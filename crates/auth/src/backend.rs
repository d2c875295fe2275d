//! Concrete authentication backend
//!
//! Bundles the credential store, token codec and authenticator behind one
//! cloneable handle. Domain states expose it via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::authenticator::Authenticator;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::store::CredentialStore;

#[derive(Clone)]
pub struct AuthBackend {
    store: Arc<dyn CredentialStore>,
    codec: TokenCodec,
    authenticator: Authenticator,
    config: AuthConfig,
}

impl AuthBackend {
    /// Wire the backend. Fails on a weak or malformed signing secret.
    pub fn new(store: Arc<dyn CredentialStore>, config: AuthConfig) -> Result<Self, AuthError> {
        let codec = TokenCodec::new(&config)?;
        let authenticator = Authenticator::new(store.clone(), config.lookup_timeout);

        Ok(Self {
            store,
            codec,
            authenticator,
            config,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub(crate) fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// Verify credentials and issue a token for the resolved identity.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let result = self.authenticator.authenticate(email, password).await?;
        self.codec.issue(&result.to_claims())
    }
}
