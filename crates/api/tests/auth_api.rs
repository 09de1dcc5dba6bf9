//! Integration tests for registration and bearer-token authentication.

mod common;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{assert_error, body_json, get_auth, post_json, seed_user, token_for};
use mpms_api::auth::jwt::{generate_access_token, JwtConfig};
use mpms_core::roles::Role;
use mpms_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

const REGISTER: &str = "/api/v1/auth/register";

#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_student(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        REGISTER,
        json!({
            "name": "  Yash Sehgal ",
            "email": "Yash.Sehgal@Jaipur.Manipal.edu",
            "password": "secret1",
            "semester": 5
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Yash Sehgal");
    assert_eq!(json["email"], "yash.sehgal@jaipur.manipal.edu");
    assert_eq!(json["role"], "STUDENT");
    assert_eq!(json["department"], "Unassigned");
    assert_eq!(json["semester"], 5);
    assert!(json.get("passwordHash").is_none());

    let user = UserRepo::find_by_email(&pool, "yash.sehgal@jaipur.manipal.edu")
        .await
        .unwrap()
        .expect("user should be stored");
    let parsed = PasswordHash::new(&user.password_hash).unwrap();
    assert!(Argon2::default()
        .verify_password(b"secret1", &parsed)
        .is_ok());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_accepts_padded_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        REGISTER,
        json!({
            "name": "Asha",
            "email": "  Asha@jaipur.manipal.edu ",
            "password": "secret1"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["email"], "asha@jaipur.manipal.edu");
    assert!(UserRepo::find_by_email(&pool, "asha@jaipur.manipal.edu")
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_outside_domain(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        REGISTER,
        json!({ "name": "Eve", "email": "eve@gmail.com", "password": "secret1" }),
    )
    .await;
    let json = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION").await;
    assert_eq!(
        json["error"]["message"],
        "Only @jaipur.manipal.edu emails are allowed"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        REGISTER,
        json!({ "name": "Asha", "email": "asha@jaipur.manipal.edu", "password": "12345" }),
    )
    .await;
    let json = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION").await;
    assert_eq!(
        json["error"]["message"],
        "Password must be at least 6 characters"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_blank_name_and_bad_semester(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        REGISTER,
        json!({ "name": "   ", "email": "asha@jaipur.manipal.edu", "password": "secret1" }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        REGISTER,
        json!({
            "name": "Asha",
            "email": "asha@jaipur.manipal.edu",
            "password": "secret1",
            "semester": 13
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_existing_email(pool: PgPool) {
    seed_user(&pool, "Asha", Role::Student).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        REGISTER,
        json!({ "name": "Asha", "email": "ASHA@jaipur.manipal.edu", "password": "secret1" }),
    )
    .await;
    let json = assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
    assert_eq!(json["error"]["message"], "Email already registered");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_body_is_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri(REGISTER)
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_and_expired_tokens_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/mentors", "not-a-jwt").await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;

    let user = seed_user(&pool, "Asha", Role::Student).await;
    let foreign = JwtConfig {
        secret: "some-other-secret-entirely-different".to_string(),
        access_token_expiry_mins: 30,
    };
    let token = generate_access_token(user.id, user.role, &foreign).unwrap();
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/mentors", &token).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn token_of_deleted_user_is_rejected(pool: PgPool) {
    let user = seed_user(&pool, "Asha", Role::Student).await;
    let token = token_for(&user);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/mentors", &token).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED").await;
}
