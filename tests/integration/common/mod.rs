//! Common test utilities and fixtures for integration tests
//!
//! Builds the composed application router over an in-memory credential
//! store, so the whole authentication flow runs without external services.

use std::sync::Arc;

use akdemia_auth::{AuthBackend, AuthConfig, Identity, InMemoryCredentialStore};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use tower::ServiceExt;

/// Raw signing key shared by the test app and hand-built tokens
pub const TEST_KEY: [u8; 32] = [42u8; 32];

pub const TRAINER_EMAIL: &str = "trainer@akdemia.test";
pub const TRAINER_PASSWORD: &str = "Tr4iner-pass";
pub const TRAINER_ID: i64 = 1001;

/// Test application with direct handle on its credential store
pub struct TestApp {
    pub router: Router,
    pub store: InMemoryCredentialStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = InMemoryCredentialStore::with_identities([Identity {
            id: TRAINER_ID,
            email: TRAINER_EMAIL.to_string(),
            password_hash: akdemia_common::hash_password(TRAINER_PASSWORD).unwrap(),
            roles: ["ROLE_TRAINER".to_string()].into_iter().collect(),
        }]);

        let auth = AuthBackend::new(
            Arc::new(store.clone()),
            AuthConfig::new(STANDARD.encode(TEST_KEY)),
        )
        .unwrap();

        Self {
            router: akdemia_app::build_router(auth),
            store,
        }
    }

    /// Send a request through the full router and decode any JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<Value>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).ok())
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Option<Value>) {
        self.send(
            Method::POST,
            "/users/generateToken",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn trainer_token(&self) -> String {
        let (status, body) = self.login(TRAINER_EMAIL, TRAINER_PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body.and_then(|b| b["token"].as_str().map(str::to_string))
            .expect("login response carries a token")
    }
}

/// Assert the `{ "error": { "code", "message" } }` envelope with the given code
pub fn assert_error_code(body: &Option<Value>, code: &str) {
    let body = body.as_ref().expect("error response has a JSON body");
    assert_eq!(body["error"]["code"], code);
    assert!(body["error"]["message"].is_string());
}
