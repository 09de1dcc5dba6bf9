//! User entity model and DTOs.

use mpms_core::roles::Role;
use mpms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub department: String,
    pub semester: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub semester: Option<i32>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            department: user.department,
            semester: user.semester,
            created_at: user.created_at,
        }
    }
}

/// Id, name and email of a user, used to enrich listings.
#[derive(Debug, Clone, FromRow)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// DTO for creating a new user. `email` must already be normalized.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    /// Defaults to `Unassigned` if omitted.
    pub department: Option<String>,
    pub semester: Option<i32>,
}
