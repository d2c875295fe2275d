//! End-to-end authentication flow through the composed router
//!
//! Login, token use on protected routes, and the gate's handling of
//! revoked, expired, tampered and re-roled tokens.

mod common;

use akdemia_auth::{Claims, IdentityClaims};
use axum::http::{Method, StatusCode};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::common::{
    assert_error_code, TestApp, TEST_KEY, TRAINER_EMAIL, TRAINER_ID, TRAINER_PASSWORD,
};

fn now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn hand_signed(key: &[u8], subject: &str, iat: u64, exp: u64) -> String {
    let claims = Claims::new(
        &IdentityClaims {
            subject: subject.to_string(),
            roles: vec!["ROLE_ADMIN".to_string()],
            id: TRAINER_ID,
        },
        iat,
        exp,
    );
    encode(&Header::default(), &claims, &EncodingKey::from_secret(key)).unwrap()
}

mod test_login {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_login_then_me_returns_identity() {
        let app = TestApp::new();
        let token = app.trainer_token().await;

        let (status, body) = app.send(Method::GET, "/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let body = body.unwrap();
        assert_eq!(body["id"], TRAINER_ID);
        assert_eq!(body["email"], TRAINER_EMAIL);
        assert_eq!(body["roles"], serde_json::json!(["ROLE_TRAINER"]));
    }

    #[tokio::test]
    async fn test_wrong_password_is_bad_credential() {
        let app = TestApp::new();
        let (status, body) = app.login(TRAINER_EMAIL, "not-the-password").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error_code(&body, "BAD_CREDENTIAL");
        assert!(body.unwrap().get("token").is_none());
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let app = TestApp::new();
        let (status, body) = app.login("stranger@akdemia.test", TRAINER_PASSWORD).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error_code(&body, "IDENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_body_is_bad_request() {
        let app = TestApp::new();
        let (status, body) = app
            .send(
                Method::POST,
                "/users/generateToken",
                None,
                Some(serde_json::json!({ "email": TRAINER_EMAIL, "password": "" })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_code(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_ignores_bearer_header() {
        let app = TestApp::new();
        let (status, body) = app
            .send(
                Method::POST,
                "/users/generateToken",
                Some("garbage"),
                Some(serde_json::json!({ "email": TRAINER_EMAIL, "password": TRAINER_PASSWORD })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.unwrap()["token"].is_string());
    }
}

mod test_gate {
    use super::*;

    #[tokio::test]
    async fn test_no_header_is_unauthenticated() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/users/me", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error_code(&body, "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_truncated_token_is_401_not_500() {
        let app = TestApp::new();
        let token = app.trainer_token().await;
        let truncated = &token[..token.len() - 1];

        let (status, body) = app
            .send(Method::GET, "/users/me", Some(truncated), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error_code(&body, "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_foreign_key_token_rejected() {
        let app = TestApp::new();
        let token = hand_signed(&[1u8; 32], TRAINER_EMAIL, now(), now() + 600);

        let (status, _) = app.send(Method::GET, "/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let app = TestApp::new();
        let token = hand_signed(&TEST_KEY, TRAINER_EMAIL, now() - 7200, now() - 60);

        let (status, _) = app.send(Method::GET, "/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_hand_signed_token_uses_store_roles() {
        let app = TestApp::new();
        let token = hand_signed(&TEST_KEY, TRAINER_EMAIL, now(), now() + 600);

        let (status, body) = app.send(Method::GET, "/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["roles"], serde_json::json!(["ROLE_TRAINER"]));
    }

    #[tokio::test]
    async fn test_role_change_visible_without_new_token() {
        let app = TestApp::new();
        let token = app.trainer_token().await;

        assert!(app.store.set_roles(
            TRAINER_EMAIL,
            vec!["ROLE_MANAGER".to_string(), "ROLE_TRAINER".to_string()],
        ));

        let (status, body) = app.send(Method::GET, "/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body.unwrap()["roles"],
            serde_json::json!(["ROLE_MANAGER", "ROLE_TRAINER"])
        );
    }

    #[tokio::test]
    async fn test_removed_identity_token_rejected() {
        let app = TestApp::new();
        let token = app.trainer_token().await;

        assert!(app.store.remove(TRAINER_EMAIL));

        let (status, _) = app.send(Method::GET, "/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

mod test_infrastructure {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let app = TestApp::new();
        let (status, _) = app
            .send(Method::GET, "/health", Some("not.a.token"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = TestApp::new();
        let (status, _) = app.send(Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
