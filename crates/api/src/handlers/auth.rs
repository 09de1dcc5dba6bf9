//! Handlers for the `/auth` resource.
//!
//! Only registration lives here; tokens are issued by the external login
//! flow.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mpms_core::error::CoreError;
use mpms_core::registration::{ensure_allowed_domain, normalize_email};
use mpms_core::roles::Role;
use mpms_db::models::user::{CreateUser, UserResponse};
use mpms_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    pub department: Option<String>,
    #[validate(range(min = 1, max = 12, message = "Semester must be between 1 and 12"))]
    pub semester: Option<i32>,
}

/// First message of a failed `validator` run, for the error envelope.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

/// POST /api/v1/auth/register
///
/// Creates a STUDENT account. The email must belong to the configured
/// institution domain.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let name = input.name.trim().to_string();
    let email = input.email.trim().to_string();
    let input = RegisterRequest { name, email, ..input };
    input
        .validate()
        .map_err(|e| CoreError::Validation(first_validation_message(&e)))?;

    ensure_allowed_domain(&input.email, &state.config.allowed_email_domain)?;
    validate_password_strength(&input.password, state.config.min_password_length)
        .map_err(CoreError::Validation)?;

    let email = normalize_email(&input.email);
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::Conflict("Email already registered".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email,
            password_hash,
            role: Role::DEFAULT,
            department: input.department.filter(|d| !d.trim().is_empty()),
            semester: input.semester,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
