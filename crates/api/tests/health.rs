//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["dbHealthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_uses_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/does-not-exist").await;

    let json = assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    assert_eq!(json["error"]["message"], "Route not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_carries_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
