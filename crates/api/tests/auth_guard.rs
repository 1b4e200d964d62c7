//! Protected routes reject anonymous and malformed credentials before
//! doing any other work.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{Request, StatusCode};

use common::{body_json, send, send_json};

const AUTH_REQUIRED: &str = "you must be authenticated to access this resource";
const INVALID_TOKEN: &str = "invalid or missing authentication token";

#[tokio::test]
async fn anonymous_writes_require_authentication() {
    for (method, uri) in [
        ("POST", "/v1/movies"),
        ("PATCH", "/v1/movies/1"),
        ("DELETE", "/v1/movies/1"),
        ("POST", "/v1/actors"),
        ("POST", "/v1/trailers"),
    ] {
        let response = send_json(method, uri, "{}").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert!(response.headers().get(WWW_AUTHENTICATE).is_none());
        assert_eq!(body_json(response).await["error"], AUTH_REQUIRED, "{method} {uri}");
    }
}

#[tokio::test]
async fn authentication_is_checked_before_the_body() {
    let response = send_json("POST", "/v1/movies", "{not json").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_headers_are_invalid_tokens() {
    for header in [
        "Basic dXNlcjpwYXNz",
        "Bearer",
        "Bearer short-token",
        "bearer 0123456789abcdef0123456789abcdef",
        "0123456789abcdef0123456789abcdef",
    ] {
        let request = Request::post("/v1/movies")
            .header(AUTHORIZATION, header)
            .body(Body::from("{}"))
            .unwrap();
        let response = send(request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header}");
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer", "{header}");
        assert_eq!(body_json(response).await["error"], INVALID_TOKEN, "{header}");
    }
}

#[tokio::test]
async fn reads_stay_public() {
    // Rejected for its query string, not for missing credentials.
    let response = send_json("GET", "/v1/movies?page=0", "").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
