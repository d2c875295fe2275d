//! Request-scoped authenticated principal

use std::collections::BTreeSet;

use crate::types::AuthIdentity;

/// Identity and authorities attached to a request by the gate.
///
/// Authorities come from the credential store at request time, not from
/// the token, so role changes apply without a new login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub identity: AuthIdentity,
    pub authorities: BTreeSet<String>,
}

impl Principal {
    pub fn new(identity: AuthIdentity, authorities: BTreeSet<String>) -> Self {
        Self {
            identity,
            authorities,
        }
    }

    pub fn id(&self) -> i64 {
        self.identity.id
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}
