//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not
//! in its allow-list with 403 Forbidden. Use these in route handlers to
//! enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mpms_core::error::CoreError;
use mpms_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[Role],
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed.contains(&user.role) {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(user)
}

/// Requires the `ADMIN` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Admin], "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Requires the `STUDENT` role.
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Student], "Student role required")
            .await
            .map(RequireStudent)
    }
}

/// Requires `MENTOR` or `ADMIN`.
pub struct RequireMentorOrAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireMentorOrAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            &[Role::Mentor, Role::Admin],
            "Mentor or Admin role required",
        )
        .await
        .map(RequireMentorOrAdmin)
    }
}

/// Requires `PBL_FACULTY` or `ADMIN`.
pub struct RequireFacultyOrAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireFacultyOrAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            &[Role::PblFaculty, Role::Admin],
            "Faculty or Admin role required",
        )
        .await
        .map(RequireFacultyOrAdmin)
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for route
/// definitions where "this route requires authentication" should read as
/// such.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
