//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Token validity window used when `JWT_VALIDITY_SECONDS` is unset
pub const DEFAULT_JWT_VALIDITY_SECONDS: u64 = 60 * 60;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_RUST_LOG: &str = "akdemia_auth=debug,akdemia_users=debug,akdemia_app=debug,tower_http=debug";

/// Upper bound on a single credential store lookup made by the request gate
pub const DEFAULT_CREDENTIAL_LOOKUP_TIMEOUT_MS: u64 = 2_000;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base64-encoded HMAC secret used to sign access tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub jwt_validity_seconds: u64,
    /// Credential store lookup timeout in milliseconds
    pub credential_lookup_timeout_ms: u64,

    /// Credential store backing: Postgres when set, in-memory otherwise
    pub database_url: Option<String>,
    /// JSON file of identities loaded into the in-memory store
    pub seed_users_file: Option<String>,

    /// Runtime configuration
    pub log_format: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_validity_seconds: parse_var("JWT_VALIDITY_SECONDS", DEFAULT_JWT_VALIDITY_SECONDS)?,
            credential_lookup_timeout_ms: parse_var(
                "CREDENTIAL_LOOKUP_TIMEOUT_MS",
                DEFAULT_CREDENTIAL_LOOKUP_TIMEOUT_MS,
            )?,

            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            seed_users_file: env::var("SEED_USERS_FILE").ok().filter(|v| !v.is_empty()),

            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        };

        if config.jwt_validity_seconds == 0 {
            anyhow::bail!("JWT_VALIDITY_SECONDS must be greater than zero");
        }

        Ok(config)
    }

    pub fn jwt_validity(&self) -> Duration {
        Duration::from_secs(self.jwt_validity_seconds)
    }

    pub fn credential_lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.credential_lookup_timeout_ms)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_validity_seconds", &self.jwt_validity_seconds)
            .field("credential_lookup_timeout_ms", &self.credential_lookup_timeout_ms)
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("seed_users_file", &self.seed_users_file)
            .field("log_format", &self.log_format)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a non-negative integer, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
