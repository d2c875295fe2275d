//! Request authentication gate
//!
//! Runs once per request before handler dispatch:
//!
//! 1. Read `Authorization: Bearer <token>`.
//! 2. Decode and verify the token.
//! 3. Skip if a `Principal` is already attached.
//! 4. Re-resolve the identity from the credential store.
//! 5. Check subject and expiry, then attach a `Principal` built from the
//!    fresh lookup.
//!
//! Every failure leaves the request unauthenticated and lets it through.
//! Whether a route needs a principal is decided downstream by the
//! `CurrentPrincipal` extractor.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Extensions, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;
use crate::principal::Principal;
use crate::store::bounded;

/// Why the gate left a request without a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    MissingBearer,
    MalformedToken,
    InvalidSignature,
    IdentityNotFound,
    /// Store errored or timed out; treated as a rejection
    StoreUnavailable,
    SubjectMismatch,
    Expired,
}

impl From<AuthError> for UnauthenticatedReason {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidSignature => UnauthenticatedReason::InvalidSignature,
            AuthError::Expired => UnauthenticatedReason::Expired,
            AuthError::IdentityNotFound => UnauthenticatedReason::IdentityNotFound,
            AuthError::StoreUnavailable(_) => UnauthenticatedReason::StoreUnavailable,
            _ => UnauthenticatedReason::MalformedToken,
        }
    }
}

/// Result of running the gate over one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Authenticated,
    /// An earlier layer already attached a principal
    AlreadyAuthenticated,
    Unauthenticated(UnauthenticatedReason),
}

impl GateOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(
            self,
            GateOutcome::Authenticated | GateOutcome::AlreadyAuthenticated
        )
    }
}

/// Evaluate the gate against request headers, attaching a principal on success.
pub async fn evaluate_request(
    backend: &AuthBackend,
    headers: &HeaderMap,
    extensions: &mut Extensions,
) -> GateOutcome {
    use UnauthenticatedReason as Reason;

    let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|value| extract_bearer_token(value))
    else {
        return GateOutcome::Unauthenticated(Reason::MissingBearer);
    };

    let claims = match backend.codec().decode(token) {
        Ok(claims) => claims,
        Err(e) => return GateOutcome::Unauthenticated(e.into()),
    };

    if extensions.get::<Principal>().is_some() {
        return GateOutcome::AlreadyAuthenticated;
    }

    let timeout = backend.config().lookup_timeout;

    let identity = match bounded(timeout, backend.store().find_identity_by_email(&claims.sub)).await
    {
        Ok(Some(identity)) => identity,
        Ok(None) => return GateOutcome::Unauthenticated(Reason::IdentityNotFound),
        Err(e) => {
            tracing::warn!(error = %e, "Credential store lookup failed, rejecting token");
            return GateOutcome::Unauthenticated(Reason::StoreUnavailable);
        }
    };

    if identity.email != claims.sub {
        return GateOutcome::Unauthenticated(Reason::SubjectMismatch);
    }

    if let Err(e) = claims.ensure_live_at(Utc::now()) {
        return GateOutcome::Unauthenticated(e.into());
    }

    let authorities =
        match bounded(timeout, backend.store().load_authorities(&identity.email)).await {
            Ok(authorities) => authorities,
            Err(e) => {
                tracing::warn!(error = %e, "Authority lookup failed, rejecting token");
                return GateOutcome::Unauthenticated(Reason::StoreUnavailable);
            }
        };

    extensions.insert(Principal::new(identity.public(), authorities));
    GateOutcome::Authenticated
}

/// Axum middleware wrapping `evaluate_request`.
///
/// ```ignore
/// router.layer(axum::middleware::from_fn_with_state(backend, authenticate_request))
/// ```
pub async fn authenticate_request(
    State(backend): State<AuthBackend>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let outcome = evaluate_request(&backend, &parts.headers, &mut parts.extensions).await;
    match outcome {
        GateOutcome::Unauthenticated(reason) => {
            tracing::debug!(?reason, path = %parts.uri.path(), "Request not authenticated");
        }
        _ => {
            if let Some(principal) = parts.extensions.get::<Principal>() {
                tracing::trace!(user_id = principal.id(), ?outcome, "Request authenticated");
            }
        }
    }

    next.run(Request::from_parts(parts, body)).await
}
