//! JWT claims types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Identity-specific facts embedded in an access token.
///
/// Timestamps are added by `TokenCodec::issue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Login subject (email)
    pub subject: String,
    /// Role names, in the order they are embedded
    pub roles: Vec<String>,
    /// Numeric identity id
    pub id: i64,
}

/// Claims carried by an Akdemia access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (email)
    pub sub: String,
    /// Role names at issuance time
    pub roles: Vec<String>,
    /// Numeric identity id
    pub id: i64,
    /// Issued at (unix seconds)
    pub iat: u64,
    /// Expires at (unix seconds)
    pub exp: u64,
}

impl Claims {
    pub fn new(identity: &IdentityClaims, iat: u64, exp: u64) -> Self {
        Self {
            sub: identity.subject.clone(),
            roles: identity.roles.clone(),
            id: identity.id,
            iat,
            exp,
        }
    }

    /// A token is only live while its expiry is strictly in the future
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let now = u64::try_from(now.timestamp()).unwrap_or(0);
        self.exp <= now
    }

    /// `Err(Expired)` once the token is past its expiry
    pub fn ensure_live_at(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.is_expired_at(now) {
            return Err(AuthError::Expired);
        }
        Ok(())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.exp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}
