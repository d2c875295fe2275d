//! Password hashing shared across Akdemia crates
//!
//! Credentials are stored as Argon2id PHC strings with a random 16-byte salt.
//! Verification goes through `password-hash`, which compares digests in
//! constant time.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{Error, Result};

fn salt() -> Result<SaltString> {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| Error::Internal(format!("Failed to generate salt: {}", e)))?;
    SaltString::encode_b64(&bytes)
        .map_err(|e| Error::Internal(format!("Failed to encode salt: {}", e)))
}

/// Hash a password into a self-describing PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = salt()?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored PHC string.
///
/// A stored value that does not parse as a PHC string never verifies.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored credential is not a valid PHC string");
            return false;
        }
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
