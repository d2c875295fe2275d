//! Shared utilities, configuration, and error handling for Akdemia
//!
//! This crate provides common functionality used across the Akdemia API:
//! - Configuration management following 12-factor principles
//! - Error types and the JSON error envelope
//! - Password hashing and verification
//! - Request validation extractors

pub mod config;
pub mod crypto;
pub mod error;
pub mod extractors;

pub use crypto::{hash_password, verify_password};
pub use error::{error_response, Error, Result};
pub use extractors::ValidatedJson;
