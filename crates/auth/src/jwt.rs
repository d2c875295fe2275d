//! Token codec and bearer extraction helpers
//!
//! `TokenCodec` is a pure cryptographic primitive: it signs and verifies
//! HS256 compact tokens but never judges expiry. Expiry is policy and lives
//! in the request gate.

use std::collections::HashSet;
use std::time::Duration;

use axum::http::HeaderValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{Claims, IdentityClaims};
use crate::config::AuthConfig;
use crate::error::AuthError;

/// HS256 needs a key at least as long as its 256-bit digest
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_VALIDITY: Duration = Duration::from_secs(365 * 24 * 60 * 60);

const BEARER_PREFIX: &str = "Bearer ";

/// Signs and verifies access tokens with a server-held symmetric key
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenCodec {
    /// Build a codec from configuration.
    ///
    /// The secret must be base64 and decode to at least `MIN_SECRET_BYTES`.
    /// Anything weaker is rejected here so a misconfigured server never starts.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let key = STANDARD
            .decode(config.jwt_secret.trim())
            .map_err(|e| AuthError::WeakSecret(format!("secret is not valid base64: {}", e)))?;

        if key.len() < MIN_SECRET_BYTES {
            return Err(AuthError::WeakSecret(format!(
                "secret decodes to {} bytes, HS256 requires at least {}",
                key.len(),
                MIN_SECRET_BYTES
            )));
        }

        if config.token_validity.is_zero() || config.token_validity > MAX_TOKEN_VALIDITY {
            return Err(AuthError::TokenIssue(format!(
                "token validity must be between 1 and {} seconds",
                MAX_TOKEN_VALIDITY.as_secs()
            )));
        }

        // Signature and structure only; exp is checked by the gate
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Ok(Self {
            encoding: EncodingKey::from_secret(&key),
            decoding: DecodingKey::from_secret(&key),
            validation,
            validity: config.token_validity,
        })
    }

    /// Issue a token stamped with the current wall-clock time.
    pub fn issue(&self, identity: &IdentityClaims) -> Result<String, AuthError> {
        let iat = u64::try_from(Utc::now().timestamp())
            .map_err(|_| AuthError::TokenIssue("system clock is before the epoch".to_string()))?;
        let exp = iat
            .checked_add(self.validity.as_secs())
            .ok_or_else(|| AuthError::TokenIssue("token expiry overflows".to_string()))?;

        self.sign(&Claims::new(identity, iat, exp))
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            AuthError::TokenIssue(e.to_string())
        })
    }

    /// Verify the signature and return the embedded claims, expired or not.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token decode failed");
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::MalformedToken,
                }
            })
    }

    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        self.decode(token)
            .map(|claims| claims.sub)
            .map_err(|_| AuthError::MalformedToken)
    }

    pub fn extract_expiry(&self, token: &str) -> Result<DateTime<Utc>, AuthError> {
        self.decode(token)
            .map_err(|_| AuthError::MalformedToken)?
            .expires_at()
            .ok_or(AuthError::MalformedToken)
    }
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Option<&str> {
    header
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
