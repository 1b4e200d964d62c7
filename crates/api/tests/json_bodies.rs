//! Request body decoding and validation on the public account endpoints.

mod common;

use axum::http::StatusCode;
use greenlight_api::json::MAX_BODY_BYTES;

use common::{body_json, send_json};

async fn register(body: impl Into<axum::body::Body>) -> (StatusCode, serde_json::Value) {
    let response = send_json("POST", "/v1/users", body).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn empty_body() {
    let (status, json) = register("").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "body must not be empty");
}

#[tokio::test]
async fn badly_formed_json() {
    let (status, json) = register(r#"{"name": "Alice",}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["error"].as_str().unwrap();
    assert!(
        message.starts_with("body contains badly-formed JSON (at line 1, column"),
        "{message}"
    );
}

#[tokio::test]
async fn truncated_json() {
    let (status, json) = register(r#"{"name": "Alice""#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "body contains badly-formed JSON");
}

#[tokio::test]
async fn incorrect_type() {
    let (status, json) = register(r#"{"name": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["error"].as_str().unwrap();
    assert!(message.starts_with("body contains incorrect JSON type"), "{message}");
}

#[tokio::test]
async fn unknown_key() {
    let (status, json) = register(r#"{"name": "Alice", "role": "admin"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], r#"body contains unknown key "role""#);
}

#[tokio::test]
async fn multiple_values() {
    let (status, json) = register(r#"{"name": "Alice"}{"name": "Bob"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "body must only contain a single JSON value");
}

#[tokio::test]
async fn oversized_body() {
    let body = format!(r#"{{"name": "{}"}}"#, "a".repeat(MAX_BODY_BYTES));
    let (status, json) = register(body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "body must not be larger than 1048576 bytes");
}

#[tokio::test]
async fn registration_reports_every_invalid_field() {
    let (status, json) =
        register(r#"{"name": "", "email": "not-an-email", "password": "short"}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json,
        serde_json::json!({
            "error": {
                "name": "must be provided",
                "email": "must be a valid email address",
                "password": "must be at least 8 bytes long",
            }
        })
    );
}

#[tokio::test]
async fn authentication_requires_credentials() {
    let response = send_json("POST", "/v1/tokens/authentication", r#"{}"#).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"]["email"], "must be provided");
    assert_eq!(json["error"]["password"], "must be provided");
}

#[tokio::test]
async fn activation_token_must_be_32_bytes() {
    let response = send_json("PUT", "/v1/users/activated", r#"{"token": "abc"}"#).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"]["token"],
        "must be 32 bytes long"
    );
}

#[tokio::test]
async fn activation_rejects_unknown_keys() {
    let response = send_json(
        "PUT",
        "/v1/users/activated",
        r#"{"token": "0123456789abcdef0123456789abcdef", "force": true}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        r#"body contains unknown key "force""#
    );
}
