//! HTTP-level integration tests for the admin freeze switches and how they
//! gate the allocation workflow.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, get_auth, patch_json_auth, post_json_auth, seed_mentor, seed_user,
    token_for,
};
use mpms_core::roles::Role;
use mpms_core::status::RequestStatus;
use mpms_db::models::mentor_request::CreateMentorRequest;
use mpms_db::repositories::MentorRequestRepo;
use serde_json::{json, Value};
use sqlx::PgPool;

async fn admin_token(pool: &PgPool) -> String {
    token_for(&seed_user(pool, "Root", Role::Admin).await)
}

async fn patch_flags(pool: &PgPool, token: &str, patch: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(app, "/api/v1/admin/freeze", token, patch).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn settings_start_fully_open(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/freeze-settings", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "allocation": false, "internalMarks": false, "presentations": false })
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_changes_only_named_flags(pool: PgPool) {
    let token = admin_token(&pool).await;

    let patch = json!({ "allocation": true, "presentations": true });
    let flags = patch_flags(&pool, &token, patch).await;
    assert_eq!(
        flags,
        json!({ "allocation": true, "internalMarks": false, "presentations": true })
    );

    let flags = patch_flags(&pool, &token, json!({ "presentations": false })).await;
    assert_eq!(
        flags,
        json!({ "allocation": true, "internalMarks": false, "presentations": false })
    );

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/freeze-settings", &token).await;
    assert_eq!(body_json(response).await, flags);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn legacy_toggle_defaults_to_freezing(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/admin/freeze",
        &token,
        json!({ "target": "internalMarks" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "internalMarks frozen");
    assert_eq!(json["freezeSettings"]["internalMarks"], true);
    assert_eq!(json["freezeSettings"]["allocation"], false);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/admin/freeze",
        &token,
        json!({ "target": "internalMarks", "frozen": false }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["message"], "internalMarks unfrozen");
    assert_eq!(json["freezeSettings"]["internalMarks"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn legacy_toggle_rejects_unknown_target(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "target": "grades" });
    let response = post_json_auth(app, "/api/v1/admin/freeze", &token, body).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/admin/freeze", &token, json!({})).await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_admins_manage_freeze(pool: PgPool) {
    let mentor = seed_mentor(&pool, "Mehta", 5).await;
    let token = token_for(&mentor);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/freeze-settings", &token).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let app = common::build_test_app(pool);
    let body = json!({ "allocation": true });
    let response = patch_json_auth(app, "/api/v1/admin/freeze", &token, body).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn allocation_freeze_blocks_every_request_mutation(pool: PgPool) {
    let token = admin_token(&pool).await;
    let student = seed_user(&pool, "Asha", Role::Student).await;
    let mentor = seed_mentor(&pool, "Mehta", 5).await;
    let other = seed_mentor(&pool, "Rao", 5).await;
    let pending = MentorRequestRepo::create(
        &pool,
        &CreateMentorRequest {
            student_id: student.id,
            mentor_id: mentor.id,
            message: String::new(),
        },
    )
    .await
    .unwrap();

    patch_flags(&pool, &token, json!({ "allocation": true })).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/mentors/requests",
        &token_for(&student),
        json!({ "mentorId": other.id }),
    )
    .await;
    let json = assert_error(response, StatusCode::FORBIDDEN, "FROZEN").await;
    assert_eq!(json["error"]["message"], "Mentor allocation is currently frozen");

    let uri = format!("/api/v1/mentors/requests/{}", pending.id);
    for (user, status) in [(&mentor, "ACCEPTED"), (&mentor, "REJECTED"), (&student, "WITHDRAWN")] {
        let app = common::build_test_app(pool.clone());
        let body = json!({ "status": status });
        let response = patch_json_auth(app, &uri, &token_for(user), body).await;
        assert_error(response, StatusCode::FORBIDDEN, "FROZEN").await;
    }

    let still = MentorRequestRepo::find_by_id(&pool, pending.id).await.unwrap().unwrap();
    assert_eq!(still.status, RequestStatus::Pending);

    // Thawing restores the workflow.
    patch_flags(&pool, &token, json!({ "allocation": false })).await;
    let app = common::build_test_app(pool);
    let body = json!({ "status": "ACCEPTED" });
    let response = patch_json_auth(app, &uri, &token_for(&mentor), body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reads_stay_open_while_frozen(pool: PgPool) {
    let token = admin_token(&pool).await;
    let student = seed_user(&pool, "Asha", Role::Student).await;
    seed_mentor(&pool, "Mehta", 5).await;
    patch_flags(
        &pool,
        &token,
        json!({ "allocation": true, "internalMarks": true, "presentations": true }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/mentors", &token_for(&student)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/mentors/requests", &token_for(&student)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn freeze_racing_a_create_is_all_or_nothing(pool: PgPool) {
    let token = admin_token(&pool).await;
    let asha = seed_user(&pool, "Asha", Role::Student).await;
    let bilal = seed_user(&pool, "Bilal", Role::Student).await;
    let mentor = seed_mentor(&pool, "Mehta", 5).await;

    let asha_token = token_for(&asha);
    let create = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/mentors/requests",
        &asha_token,
        json!({ "mentorId": mentor.id }),
    );
    let freeze = patch_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/freeze",
        &token,
        json!({ "allocation": true }),
    );
    let (created, frozen) = tokio::join!(create, freeze);
    assert_eq!(frozen.status(), StatusCode::OK);

    let stored: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM mentor_requests WHERE student_id = $1")
            .bind(asha.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    match created.status() {
        StatusCode::CREATED => assert_eq!(stored, 1),
        _ => {
            assert_error(created, StatusCode::FORBIDDEN, "FROZEN").await;
            assert_eq!(stored, 0);
        }
    }

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/mentors/requests",
        &token_for(&bilal),
        json!({ "mentorId": mentor.id }),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FROZEN").await;
}
