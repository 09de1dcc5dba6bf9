//! Handlers for the `/admin` resource: users, roles, mentor profiles and
//! the freeze switches.

use axum::extract::{Path, State};
use axum::Json;
use mpms_core::error::CoreError;
use mpms_core::freeze::{FreezeFlags, FreezePatch, FreezeTarget};
use mpms_core::roles::Role;
use mpms_core::types::DbId;
use mpms_db::models::mentor_profile::{MentorProfile, UpdateMentorProfile};
use mpms_db::models::user::UserResponse;
use mpms_db::repositories::{FreezeSettingsRepo, MentorProfileRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Option<String>,
}

/// Response for a role change.
#[derive(Debug, Serialize)]
pub struct ChangeRoleResponse {
    pub message: &'static str,
    pub user: RoleChangedUser,
}

#[derive(Debug, Serialize)]
pub struct RoleChangedUser {
    pub id: DbId,
    pub name: String,
    pub role: Role,
}

/// Request body for the legacy `POST /admin/freeze`.
#[derive(Debug, Deserialize)]
pub struct ToggleFreezeRequest {
    pub target: Option<String>,
    /// Defaults to `true`.
    pub frozen: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFreezeResponse {
    pub message: String,
    pub freeze_settings: FreezeFlags,
}

// ---------------------------------------------------------------------------
// Users and roles
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PATCH /api/v1/admin/users/{id}/role
///
/// Promotion to MENTOR also creates the mentor profile if it is missing.
pub async fn change_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ChangeRoleRequest>,
) -> AppResult<Json<ChangeRoleResponse>> {
    let role: Role = input
        .role
        .as_deref()
        .ok_or_else(|| CoreError::Validation("role is required".into()))?
        .parse()?;

    let user = UserRepo::set_role(&state.pool, id, role, state.config.default_mentor_capacity)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    tracing::info!(user_id = id, admin_id = admin.user_id, %role, "User role changed");

    Ok(Json(ChangeRoleResponse {
        message: "Role updated",
        user: RoleChangedUser {
            id: user.id,
            name: user.name,
            role: user.role,
        },
    }))
}

// ---------------------------------------------------------------------------
// Mentor profiles
// ---------------------------------------------------------------------------

/// PATCH /api/v1/admin/mentor-profiles/{user_id}
pub async fn update_mentor_profile(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    AppJson(input): AppJson<UpdateMentorProfile>,
) -> AppResult<Json<MentorProfile>> {
    if input.capacity.is_some_and(|c| c < 0) {
        return Err(CoreError::Validation("capacity must not be negative".into()).into());
    }

    let profile = MentorProfileRepo::update(&state.pool, user_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Mentor profile",
            id: user_id,
        })?;

    tracing::info!(
        mentor_id = user_id,
        admin_id = admin.user_id,
        capacity = profile.capacity,
        accepting_requests = profile.accepting_requests,
        "Mentor profile updated",
    );
    Ok(Json(profile))
}

// ---------------------------------------------------------------------------
// Freeze switches
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/freeze-settings
pub async fn get_freeze_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<FreezeFlags>> {
    let flags = FreezeSettingsRepo::flags(&state.pool).await?;
    Ok(Json(flags))
}

/// PATCH /api/v1/admin/freeze
///
/// Any subset of `allocation`, `internalMarks`, `presentations`; absent
/// flags are unchanged.
pub async fn patch_freeze_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(patch): AppJson<FreezePatch>,
) -> AppResult<Json<FreezeFlags>> {
    let settings = FreezeSettingsRepo::patch(&state.pool, &patch).await?;
    let flags = settings.flags();
    tracing::info!(
        admin_id = admin.user_id,
        allocation = flags.allocation,
        internal_marks = flags.internal_marks,
        presentations = flags.presentations,
        version = settings.version,
        "Freeze settings updated",
    );
    Ok(Json(flags))
}

/// POST /api/v1/admin/freeze
///
/// Single-flag form: `{target, frozen?}` with `frozen` defaulting to true.
pub async fn toggle_freeze(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<ToggleFreezeRequest>,
) -> AppResult<Json<ToggleFreezeResponse>> {
    let target: FreezeTarget = input
        .target
        .as_deref()
        .ok_or_else(|| CoreError::Validation("target is required".into()))?
        .parse()?;
    let frozen = input.frozen.unwrap_or(true);

    let settings =
        FreezeSettingsRepo::patch(&state.pool, &FreezePatch::single(target, frozen)).await?;
    tracing::info!(admin_id = admin.user_id, %target, frozen, "Freeze toggled");

    let verb = if frozen { "frozen" } else { "unfrozen" };
    Ok(Json(ToggleFreezeResponse {
        message: format!("{target} {verb}"),
        freeze_settings: settings.flags(),
    }))
}
