//! Token authentication boundary for the Akdemia API
//!
//! Issues signed bearer tokens on login, and re-validates them on every
//! request against the credential store. Handlers read the outcome through
//! the `CurrentPrincipal` / `MaybePrincipal` extractors.

mod authenticator;
mod backend;
mod claims;
mod config;
mod error;
mod extractors;
mod gate;
mod jwt;
mod pg;
mod principal;
mod store;
mod types;

pub use authenticator::Authenticator;
pub use backend::AuthBackend;
pub use claims::{Claims, IdentityClaims};
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{CurrentPrincipal, MaybePrincipal};
pub use gate::{authenticate_request, evaluate_request, GateOutcome, UnauthenticatedReason};
pub use jwt::{TokenCodec, MAX_TOKEN_VALIDITY, MIN_SECRET_BYTES};
pub use pg::PgCredentialStore;
pub use principal::Principal;
pub use store::{CredentialStore, InMemoryCredentialStore, SeedIdentity, StoreError};
pub use types::{AuthIdentity, AuthResult, Identity};
