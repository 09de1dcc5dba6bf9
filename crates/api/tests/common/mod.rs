#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use mpms_api::auth::jwt::{generate_access_token, JwtConfig};
use mpms_api::config::ServerConfig;
use mpms_api::router::build_app_router;
use mpms_api::state::AppState;
use mpms_core::roles::Role;
use mpms_db::models::user::{CreateUser, User};
use mpms_db::repositories::{MentorProfileRepo, UserRepo};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with the development defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        allowed_email_domain: "@jaipur.manipal.edu".to_string(),
        default_mentor_capacity: 10,
        min_password_length: 6,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 30,
        },
    }
}

/// Build the full application router, with the production middleware
/// stack, on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert a user with the given role directly through the repository.
pub async fn seed_user(pool: &PgPool, name: &str, role: Role) -> User {
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{}@jaipur.manipal.edu", name.to_lowercase().replace(' ', ".")),
        password_hash: "not-a-real-hash".to_string(),
        role,
        department: None,
        semester: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Insert a MENTOR with a profile of the given capacity.
pub async fn seed_mentor(pool: &PgPool, name: &str, capacity: i32) -> User {
    let mentor = seed_user(pool, name, Role::Mentor).await;
    MentorProfileRepo::ensure_exists(pool, mentor.id, capacity)
        .await
        .expect("profile creation should succeed");
    mentor
}

/// Force a mentor's load, bypassing the workflow.
pub async fn set_load(pool: &PgPool, mentor_id: i64, current_load: i32) {
    sqlx::query("UPDATE mentor_profiles SET current_load = $2 WHERE user_id = $1")
        .bind(mentor_id)
        .bind(current_load)
        .execute(pool)
        .await
        .expect("load update should succeed");
}

/// A valid access token for `user`.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send one request through the app. `token` becomes a Bearer header and
/// `body` a JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert the status and the error code of an error response.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], code, "unexpected body: {json}");
    json
}
