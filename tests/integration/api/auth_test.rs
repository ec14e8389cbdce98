//! Authentication API integration tests
//!
//! Tests for the register, login and me endpoints.

use axum::http::{header::WWW_AUTHENTICATE, HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use blogd::backend::auth::handlers::{TokenResponse, UserResponse};

use crate::common::{create_test_user, expired_token, login, test_server, test_state, TEST_PASSWORD};

#[tokio::test]
async fn test_register_success() {
    let server = test_server(test_state());

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let user: UserResponse = response.json();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");

    let body: Value = response.json();
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = test_server(test_state());
    create_test_user(&server, "alice").await;

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Username already registered");
}

#[tokio::test]
async fn test_register_invalid_fields_name_the_field() {
    let server = test_server(test_state());

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "not-an-email",
            "password": "password123"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "email");

    let response = server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "short"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "password");
}

#[tokio::test]
async fn test_register_malformed_body() {
    let server = test_server(test_state());

    let response = server
        .post("/register")
        .json(&json!({ "username": "alice" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "body");
}

#[tokio::test]
async fn test_login_success() {
    let state = test_state();
    let server = test_server(state.clone());
    create_test_user(&server, "alice").await;

    let response = server
        .post("/login")
        .json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: TokenResponse = response.json();
    assert_eq!(body.token_type, "bearer");
    assert_eq!(body.expires_in, 90 * 60);
    assert_eq!(state.tokens.validate(&body.access_token).unwrap(), "alice");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = test_server(test_state());
    create_test_user(&server, "alice").await;

    let wrong_password = server
        .post("/login")
        .json(&json!({ "username": "alice", "password": "wrongpassword" }))
        .await;
    let unknown_user = server
        .post("/login")
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json::<Value>(), unknown_user.json::<Value>());
    assert_eq!(wrong_password.header(WWW_AUTHENTICATE), "Bearer");
}

#[tokio::test]
async fn test_get_me() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;

    let response = server.get("/me").authorization_bearer(&alice.token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let user: UserResponse = response.json();
    assert_eq!(user.username, alice.username);
    assert_eq!(user.email, alice.email);
}

#[tokio::test]
async fn test_get_me_without_token() {
    let server = test_server(test_state());

    let response = server.get("/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.header(WWW_AUTHENTICATE), "Bearer");
    assert_eq!(response.json::<Value>()["error"], "Could not validate credentials");
}

#[tokio::test]
async fn test_get_me_rejects_bad_tokens() {
    let server = test_server(test_state());
    create_test_user(&server, "alice").await;

    let garbage = server.get("/me").authorization_bearer("not.a.token").await;
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);

    let expired = server.get("/me").authorization_bearer(expired_token("alice")).await;
    assert_eq!(expired.status_code(), StatusCode::UNAUTHORIZED);

    let basic = server
        .get("/me")
        .add_header(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Basic YWxpY2U6cGFzc3dvcmQxMjM="),
        )
        .await;
    assert_eq!(basic.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_subject_rejected() {
    // a validly signed token whose subject was never registered
    let state = test_state();
    let token = state.tokens.issue("ghost", None).unwrap();
    let server = test_server(state);

    let response = server.get("/me").authorization_bearer(token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_relogin_issues_usable_token() {
    let server = test_server(test_state());
    let alice = create_test_user(&server, "alice").await;

    let second = login(&server, "alice", TEST_PASSWORD).await;
    for token in [alice.token, second] {
        server.get("/me").authorization_bearer(token).await.assert_status_ok();
    }
}

#[tokio::test]
async fn test_health_and_fallback() {
    let server = test_server(test_state());

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));

    let missing = server.get("/does-not-exist").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}
