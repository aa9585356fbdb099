use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use taskhive::router::init_router;
use taskhive::state::AppState;
use taskhive_auth::memory::{MemoryIdentityStore, MemorySessionStore, MemoryWorkspaceStore};
use taskhive_config::{CookieConfig, CorsConfig, JwtConfig, SessionConfig};

pub const SESSION_COOKIE: &str = "taskhive_session";
pub const TOKEN_COOKIE: &str = "taskhive_token";
pub const ACCOUNT_COOKIE: &str = "taskhive_account";

/// Router over in-memory stores. Also returns the identity store so tests
/// can reach behind the HTTP surface (deactivate accounts, etc.).
pub fn test_app() -> (Router, Arc<MemoryIdentityStore>, Arc<MemorySessionStore>) {
    let identities = Arc::new(MemoryIdentityStore::new());
    let sessions = Arc::new(MemorySessionStore::new());
    let workspaces = Arc::new(MemoryWorkspaceStore::new(identities.clone()));

    let state = AppState::new(
        sessions.clone(),
        identities.clone(),
        workspaces,
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            issuer: "taskhive".to_string(),
            audience: "taskhive-clients".to_string(),
            token_ttl_secs: 3600,
        },
        SessionConfig {
            session_ttl_secs: 3600,
        },
        CookieConfig {
            session_cookie: SESSION_COOKIE.to_string(),
            token_cookie: TOKEN_COOKIE.to_string(),
            account_cookie: ACCOUNT_COOKIE.to_string(),
            path: "/".to_string(),
            secure: false,
            cross_origin: false,
        },
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );

    (init_router(state), identities, sessions)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    cookies: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookies: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    let request = builder.body(Body::empty()).unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Pulls `name=value` out of the response's Set-Cookie headers.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|header| header.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(n, _)| *n == name)
        .map(|(_, value)| value.to_string())
}

pub async fn register(app: &Router, email: &str, password: &str) {
    let response = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        json!({ "name": "Test User", "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Registers and logs in, returning the session and access token values.
pub async fn login(app: &Router, email: &str, password: &str) -> (String, String) {
    let response = send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let session = set_cookie_value(&response, SESSION_COOKIE).expect("session cookie");
    let token = set_cookie_value(&response, TOKEN_COOKIE).expect("token cookie");
    (session, token)
}
