//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mpms_core::error::CoreError;
use mpms_core::roles::Role;
use mpms_core::types::DbId;
use mpms_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from a JWT Bearer token in the
/// `Authorization` header.
///
/// The token only proves identity. The user row is reloaded on every
/// request so the role here is the current one, not the one at issue time.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's current role.
    pub role: Role,
}

fn unauthenticated(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthenticated("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthenticated("Invalid or expired token"))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| unauthenticated("User no longer exists"))?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}
