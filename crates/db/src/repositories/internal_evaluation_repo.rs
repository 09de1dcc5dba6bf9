//! Repository for the `internal_evaluations` table.

use mpms_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::internal_evaluation::{
    CreateInternalEvaluation, InternalEvaluation, UpdateInternalEvaluation,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, student_id, mentor_id, criteria, total_score, remarks, \
    locked, created_at, updated_at";

/// Provides CRUD operations for internal evaluations.
///
/// There is at most one evaluation per (project, student, mentor), enforced
/// by `uq_internal_evaluations_triple`.
pub struct InternalEvaluationRepo;

impl InternalEvaluationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateInternalEvaluation,
    ) -> Result<InternalEvaluation, sqlx::Error> {
        let query = format!(
            "INSERT INTO internal_evaluations
                (project_id, student_id, mentor_id, criteria, total_score, remarks)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InternalEvaluation>(&query)
            .bind(input.project_id)
            .bind(input.student_id)
            .bind(input.mentor_id)
            .bind(Json(&input.criteria))
            .bind(input.total_score)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InternalEvaluation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM internal_evaluations WHERE id = $1");
        sqlx::query_as::<_, InternalEvaluation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The evaluation `mentor_id` gave `student_id` on a project, if any.
    pub async fn find_by_triple(
        pool: &PgPool,
        project_id: DbId,
        student_id: DbId,
        mentor_id: DbId,
    ) -> Result<Option<InternalEvaluation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM internal_evaluations
             WHERE project_id = $1 AND student_id = $2 AND mentor_id = $3"
        );
        sqlx::query_as::<_, InternalEvaluation>(&query)
            .bind(project_id)
            .bind(student_id)
            .bind(mentor_id)
            .fetch_optional(pool)
            .await
    }

    /// Resubmit an evaluation. Only unlocked rows are updated.
    ///
    /// Returns `None` if the row is missing or locked.
    pub async fn update_unlocked(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInternalEvaluation,
    ) -> Result<Option<InternalEvaluation>, sqlx::Error> {
        let query = format!(
            "UPDATE internal_evaluations SET
                criteria = COALESCE($2, criteria),
                total_score = $3,
                remarks = COALESCE($4, remarks)
             WHERE id = $1 AND NOT locked
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InternalEvaluation>(&query)
            .bind(id)
            .bind(input.criteria.as_ref().map(Json))
            .bind(input.total_score)
            .bind(&input.remarks)
            .fetch_optional(pool)
            .await
    }

    /// Lock or unlock an evaluation. Returns `None` if it does not exist.
    pub async fn set_locked(
        pool: &PgPool,
        id: DbId,
        locked: bool,
    ) -> Result<Option<InternalEvaluation>, sqlx::Error> {
        let query = format!(
            "UPDATE internal_evaluations SET locked = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InternalEvaluation>(&query)
            .bind(id)
            .bind(locked)
            .fetch_optional(pool)
            .await
    }

    /// Evaluations of a project, optionally restricted to one student,
    /// newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        student_id: Option<DbId>,
    ) -> Result<Vec<InternalEvaluation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM internal_evaluations
             WHERE project_id = $1 AND ($2::BIGINT IS NULL OR student_id = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, InternalEvaluation>(&query)
            .bind(project_id)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }
}
