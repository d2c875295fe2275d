//! Identity types seen by the authentication boundary
//!
//! These are read models over the system of record for users. The boundary
//! never mutates an identity.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claims::IdentityClaims;

/// Identity as returned by the credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    /// Unique login subject
    pub email: String,
    /// Salted one-way hash (PHC string)
    pub password_hash: String,
    pub roles: BTreeSet<String>,
}

impl Identity {
    /// Public view without the credential hash
    pub fn public(&self) -> AuthIdentity {
        AuthIdentity {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Identity reference carried by principals and login results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: i64,
    pub email: String,
}

/// Successful credential verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub identity: AuthIdentity,
    pub authorities: BTreeSet<String>,
}

impl AuthResult {
    /// Claims to embed when issuing a token for this result
    pub fn to_claims(&self) -> IdentityClaims {
        IdentityClaims {
            subject: self.identity.email.clone(),
            roles: self.authorities.iter().cloned().collect(),
            id: self.identity.id,
        }
    }
}
