//! Repository for the `mentor_profiles` table.

use mpms_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::mentor_profile::{MentorListing, MentorProfile, UpdateMentorProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, specialization_tags, capacity, current_load, \
    accepting_requests, created_at, updated_at";

/// Provides access to mentor profiles and their capacity counters.
pub struct MentorProfileRepo;

impl MentorProfileRepo {
    /// Create an empty profile for `user_id` unless one already exists.
    ///
    /// Returns `true` if a profile was created.
    pub async fn ensure_exists<'e, E>(
        executor: E,
        user_id: DbId,
        capacity: i32,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "INSERT INTO mentor_profiles (user_id, capacity)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(capacity)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<MentorProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mentor_profiles WHERE user_id = $1");
        sqlx::query_as::<_, MentorProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the user has no profile.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateMentorProfile,
    ) -> Result<Option<MentorProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE mentor_profiles SET
                capacity = COALESCE($2, capacity),
                accepting_requests = COALESCE($3, accepting_requests),
                specialization_tags = COALESCE($4, specialization_tags)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorProfile>(&query)
            .bind(user_id)
            .bind(input.capacity)
            .bind(input.accepting_requests)
            .bind(&input.specialization_tags)
            .fetch_optional(pool)
            .await
    }

    /// Every MENTOR user with their profile counters, ordered by name.
    pub async fn list_mentors(pool: &PgPool) -> Result<Vec<MentorListing>, sqlx::Error> {
        sqlx::query_as::<_, MentorListing>(
            "SELECT u.id, u.name, u.email, u.department,
                    p.specialization_tags, p.capacity, p.current_load, p.accepting_requests
             FROM users u
             LEFT JOIN mentor_profiles p ON p.user_id = u.id
             WHERE u.role = 'MENTOR'
             ORDER BY u.name, u.id",
        )
        .fetch_all(pool)
        .await
    }
}
