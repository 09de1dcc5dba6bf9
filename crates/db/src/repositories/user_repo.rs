//! Repository for the `users` table.

use mpms_core::registration::DEFAULT_DEPARTMENT;
use mpms_core::roles::Role;
use mpms_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserSummary};
use crate::repositories::MentorProfileRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, password_hash, role, department, semester, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A missing department is stored as [`DEFAULT_DEPARTMENT`]. Fails with a
    /// unique violation on `uq_users_email` if the email is taken.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, department, semester)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(input.department.as_deref().unwrap_or(DEFAULT_DEPARTMENT))
            .bind(input.semester)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Name and email of every user in `ids`, in one round trip.
    ///
    /// Unknown ids are silently skipped.
    pub async fn find_summaries(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, UserSummary>("SELECT id, name, email FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all users, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Change a user's role.
    ///
    /// Promotion to MENTOR also creates the mentor profile (with
    /// `default_capacity`) in the same transaction, keeping an existing
    /// profile untouched. Returns `None` if the user does not exist.
    pub async fn set_role(
        pool: &PgPool,
        id: DbId,
        role: Role,
        default_capacity: i32,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        if role == Role::Mentor {
            MentorProfileRepo::ensure_exists(&mut *tx, user.id, default_capacity).await?;
        }

        tx.commit().await?;
        Ok(Some(user))
    }
}
