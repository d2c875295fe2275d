//! Postgres-backed credential store
//!
//! Reads the `users`, `roles` and `user_roles` tables owned by the user
//! management service. Uses runtime `sqlx::query_as` (not macros) so the
//! crate builds without a live database.

use std::collections::BTreeSet;

use sqlx::PgPool;

use crate::store::{CredentialStore, StoreError};
use crate::types::Identity;

/// Row type for identity lookup (includes the credential hash)
#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: i64,
    email: String,
    password: String,
}

#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn roles_for(&self, email: &str) -> Result<BTreeSet<String>, StoreError> {
        let roles: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT r.name
            FROM roles r
            INNER JOIN user_roles ur ON r.id = ur.role_id
            INNER JOIN users u ON u.id = ur.user_id
            WHERE u.email = $1
            ORDER BY r.name ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load roles");
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(roles.into_iter().map(|(name,)| name).collect())
    }
}

#[async_trait::async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let row: Option<IdentityRow> = sqlx::query_as(
            r#"
            SELECT id, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load identity");
            StoreError::Unavailable(e.to_string())
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let roles = self.roles_for(&row.email).await?;

        Ok(Some(Identity {
            id: row.id,
            email: row.email,
            password_hash: row.password,
            roles,
        }))
    }

    async fn load_authorities(&self, email: &str) -> Result<BTreeSet<String>, StoreError> {
        self.roles_for(email).await
    }
}
