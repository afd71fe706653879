#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tourbase::config::{AppConfig, JwtConfig};
use tourbase::state::AppState;
use tourbase::app;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-signing-secret";

/// App wired to in-memory stores; each call gets an isolated instance.
pub fn test_app() -> Router {
    let config = AppConfig {
        database_url: "postgres://unused".into(),
        jwt: JwtConfig {
            secret: TEST_SECRET.into(),
            ttl_minutes: 60,
        },
    };
    app::build_app(AppState::in_memory(config))
}

pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    send(app, request).await
}

/// Same as `request` but with a verbatim Authorization header value.
pub async fn get_with_header(app: &Router, path: &str, auth: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .expect("build request");
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn get(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, Method::GET, path, token, None).await
}

pub async fn post_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, Method::POST, path, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    request(app, Method::PUT, path, token, Some(body)).await
}

pub async fn delete(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, Method::DELETE, path, token, None).await
}

pub fn valid_signup_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "Str0ng!pass",
        "name": "Ada Lovelace",
        "phone_number": "0123456789",
        "gender": "female",
        "date_of_birth": "1990-01-05",
    })
}

/// Registers a user and returns (token, user id).
pub async fn signup_user(app: &Router, email: &str) -> (String, String) {
    let (status, body) = post_json(app, "/users/signup", None, valid_signup_body(email)).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    let token = body["token"].as_str().expect("token in response").to_string();
    let user_id = body["user"]["id"]
        .as_str()
        .expect("user id in response")
        .to_string();
    (token, user_id)
}
