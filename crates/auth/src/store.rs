//! Credential store seam
//!
//! The system of record for identities lives outside the authentication
//! boundary. It is reached only through `CredentialStore`; the in-memory
//! adapter here serves tests and local development.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::Deserialize;

use crate::types::Identity;

/// Credential store failure (connectivity, corrupt rows, poisoned state)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid store data: {0}")]
    InvalidData(String),
}

/// Read access to identities and their authorities
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an identity by its login email
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Current role names for an email; unknown emails have none
    async fn load_authorities(&self, email: &str) -> Result<BTreeSet<String>, StoreError>;
}

/// Run a store call under a deadline; an elapsed deadline counts as unavailable
pub(crate) async fn bounded<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Unavailable(format!(
            "lookup exceeded {}ms",
            timeout.as_millis()
        ))),
    }
}

/// Seed record for the in-memory store
#[derive(Debug, Deserialize)]
pub struct SeedIdentity {
    pub id: i64,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Process-local credential store keyed by email
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    identities: Arc<RwLock<HashMap<String, Identity>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let store = Self::new();
        for identity in identities {
            store.insert(identity);
        }
        store
    }

    /// Build a store from seed records, hashing each plaintext password
    pub fn from_seeds(seeds: Vec<SeedIdentity>) -> Result<Self, StoreError> {
        let store = Self::new();
        for seed in seeds {
            let password_hash = akdemia_common::hash_password(&seed.password)
                .map_err(|e| StoreError::InvalidData(e.to_string()))?;
            store.insert(Identity {
                id: seed.id,
                email: seed.email,
                password_hash,
                roles: seed.roles.into_iter().collect(),
            });
        }
        Ok(store)
    }

    /// Load seed records from a JSON array on disk
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {}", path.display(), e))
        })?;
        let seeds: Vec<SeedIdentity> = serde_json::from_str(&raw).map_err(|e| {
            StoreError::InvalidData(format!("failed to parse {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), count = seeds.len(), "Loading seed identities");
        Self::from_seeds(seeds)
    }

    /// Insert or replace an identity
    pub fn insert(&self, identity: Identity) {
        if let Ok(mut identities) = self.identities.write() {
            identities.insert(identity.email.clone(), identity);
        }
    }

    /// Replace the role set of an existing identity. Returns false if unknown.
    pub fn set_roles(&self, email: &str, roles: impl IntoIterator<Item = String>) -> bool {
        match self.identities.write() {
            Ok(mut identities) => match identities.get_mut(email) {
                Some(identity) => {
                    identity.roles = roles.into_iter().collect();
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Remove an identity. Returns false if unknown.
    pub fn remove(&self, email: &str) -> bool {
        self.identities
            .write()
            .map(|mut identities| identities.remove(email).is_some())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.identities.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Identity>>, StoreError> {
        self.identities
            .read()
            .map_err(|_| StoreError::Unavailable("identity map lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.read()?.get(email).cloned())
    }

    async fn load_authorities(&self, email: &str) -> Result<BTreeSet<String>, StoreError> {
        Ok(self
            .read()?
            .get(email)
            .map(|identity| identity.roles.clone())
            .unwrap_or_default())
    }
}
