//! Axum extractors for the authenticated principal
//!
//! The gate middleware attaches a `Principal` to request extensions; these
//! extractors read it back. They work under any router state.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AuthError;
use crate::principal::Principal;

/// Required principal. Rejects with 401 UNAUTHENTICATED when the gate
/// did not authenticate the request.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Optional principal, for routes open to anonymous callers
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

impl<S> FromRequestParts<S> for MaybePrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(MaybePrincipal(parts.extensions.get::<Principal>().cloned()))
    }
}
