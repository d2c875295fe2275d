//! Custom axum extractors for Akdemia

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::Error;

/// JSON extractor that validates the deserialized value automatically.
///
/// Requires `T: DeserializeOwned + Validate`.
/// All input errors (deserialization + validation) return 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for `ValidatedJson`:
/// - JSON deserialization errors → 400 (via `Error::Validation`)
/// - Validation errors → 400 (via `Error::Validation`)
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Validation(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Json(e) => Error::Validation(e.body_text()).into_response(),
            ValidatedJsonRejection::Validation(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(|e| {
            ValidatedJsonRejection::Validation(Error::Validation(format!(
                "Validation failed: {}",
                e
            )))
        })?;
        Ok(ValidatedJson(value))
    }
}
