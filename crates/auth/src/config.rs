//! Authentication configuration

use std::fmt;
use std::time::Duration;

use akdemia_common::config::{
    Config, DEFAULT_CREDENTIAL_LOOKUP_TIMEOUT_MS, DEFAULT_JWT_VALIDITY_SECONDS,
};

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Base64-encoded HMAC-SHA256 secret
    pub jwt_secret: String,
    /// Lifetime of issued tokens
    pub token_validity: Duration,
    /// Bound on each credential store call
    pub lookup_timeout: Duration,
}

impl AuthConfig {
    /// Configuration with default validity and lookup timeout
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_validity: Duration::from_secs(DEFAULT_JWT_VALIDITY_SECONDS),
            lookup_timeout: Duration::from_millis(DEFAULT_CREDENTIAL_LOOKUP_TIMEOUT_MS),
        }
    }

    pub fn with_token_validity(mut self, validity: Duration) -> Self {
        self.token_validity = validity;
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_validity: config.jwt_validity(),
            lookup_timeout: config.credential_lookup_timeout(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_validity", &self.token_validity)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}
