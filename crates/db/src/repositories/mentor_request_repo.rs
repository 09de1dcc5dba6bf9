//! Repository for the `mentor_requests` table.

use mpms_core::allocation::{RequestScope, StudentRequestSummary};
use mpms_core::status::RequestStatus;
use mpms_core::types::DbId;
use sqlx::PgPool;

use crate::models::mentor_request::{CreateMentorRequest, MentorRequest};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, student_id, mentor_id, status, message, created_at, updated_at";

/// Provides CRUD operations for mentor requests.
pub struct MentorRequestRepo;

impl MentorRequestRepo {
    /// Insert a new PENDING request.
    ///
    /// The partial unique indexes reject a second pending request for the
    /// same pair (`uq_mentor_requests_pending_pair`).
    pub async fn create(
        pool: &PgPool,
        input: &CreateMentorRequest,
    ) -> Result<MentorRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentor_requests (student_id, mentor_id, status, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorRequest>(&query)
            .bind(input.student_id)
            .bind(input.mentor_id)
            .bind(RequestStatus::Pending.as_str())
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MentorRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mentor_requests WHERE id = $1");
        sqlx::query_as::<_, MentorRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Requests visible under `scope`, newest first.
    pub async fn list(pool: &PgPool, scope: RequestScope) -> Result<Vec<MentorRequest>, sqlx::Error> {
        let (filter, id) = match scope {
            RequestScope::Mentor(id) => ("WHERE mentor_id = $1", Some(id)),
            RequestScope::Student(id) => ("WHERE student_id = $1", Some(id)),
            RequestScope::All => ("", None),
        };
        let query = format!(
            "SELECT {COLUMNS} FROM mentor_requests {filter} ORDER BY created_at DESC, id DESC"
        );
        let mut q = sqlx::query_as::<_, MentorRequest>(&query);
        if let Some(id) = id {
            q = q.bind(id);
        }
        q.fetch_all(pool).await
    }

    /// Aggregate the student's existing requests relevant to a new request
    /// to `mentor_id`.
    pub async fn summary_for_student(
        pool: &PgPool,
        student_id: DbId,
        mentor_id: DbId,
    ) -> Result<StudentRequestSummary, sqlx::Error> {
        let (has_accepted, pending_count, has_pending_to_mentor): (bool, i64, bool) =
            sqlx::query_as(
                "SELECT
                    COALESCE(bool_or(status = 'ACCEPTED'), false),
                    COUNT(*) FILTER (WHERE status = 'PENDING'),
                    COALESCE(bool_or(status = 'PENDING' AND mentor_id = $2), false)
                 FROM mentor_requests
                 WHERE student_id = $1",
            )
            .bind(student_id)
            .bind(mentor_id)
            .fetch_one(pool)
            .await?;
        Ok(StudentRequestSummary {
            has_accepted,
            pending_count,
            has_pending_to_mentor,
        })
    }

    /// Move a PENDING request to `to`.
    ///
    /// Returns `None` if the request no longer exists or is no longer
    /// pending. Acceptance goes through
    /// [`AllocationRepo::accept`](crate::repositories::AllocationRepo::accept)
    /// instead, which carries the side effects.
    pub async fn transition_from_pending(
        pool: &PgPool,
        id: DbId,
        to: RequestStatus,
    ) -> Result<Option<MentorRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE mentor_requests SET status = $2
             WHERE id = $1 AND status = 'PENDING'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorRequest>(&query)
            .bind(id)
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }
}
