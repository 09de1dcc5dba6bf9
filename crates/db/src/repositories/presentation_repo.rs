//! Repository for presentation events, slots and slot evaluations.

use mpms_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::presentation::{
    CreatePresentationEvaluation, CreatePresentationEvent, CreatePresentationSlot,
    PresentationEvaluation, PresentationEvent, PresentationSlot,
};

const EVENT_COLUMNS: &str = "id, event_type, title, start_date, end_date, duration_minutes, \
    created_by_id, locked, created_at";

const SLOT_COLUMNS: &str = "id, event_id, start_time, end_time, venue, assigned_to_type, \
    project_id, student_id, created_at";

const EVALUATION_COLUMNS: &str = "id, slot_id, evaluator_id, attendance, rubric, total_score, \
    feedback, created_at, updated_at";

pub struct PresentationRepo;

impl PresentationRepo {
    pub async fn create_event(
        pool: &PgPool,
        input: &CreatePresentationEvent,
    ) -> Result<PresentationEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO presentation_events
                (event_type, title, start_date, end_date, duration_minutes, created_by_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, 15), $6)
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, PresentationEvent>(&query)
            .bind(input.event_type.as_str())
            .bind(&input.title)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.duration_minutes)
            .bind(input.created_by_id)
            .fetch_one(pool)
            .await
    }

    pub async fn create_slot(
        pool: &PgPool,
        input: &CreatePresentationSlot,
    ) -> Result<PresentationSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO presentation_slots
                (event_id, start_time, end_time, venue, assigned_to_type, project_id, student_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SLOT_COLUMNS}"
        );
        sqlx::query_as::<_, PresentationSlot>(&query)
            .bind(input.event_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.venue)
            .bind(input.assigned_to_type.as_str())
            .bind(input.project_id)
            .bind(input.student_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_slot(pool: &PgPool, id: DbId) -> Result<Option<PresentationSlot>, sqlx::Error> {
        let query = format!("SELECT {SLOT_COLUMNS} FROM presentation_slots WHERE id = $1");
        sqlx::query_as::<_, PresentationSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record an evaluation. A slot may collect any number of them.
    pub async fn create_evaluation(
        pool: &PgPool,
        input: &CreatePresentationEvaluation,
    ) -> Result<PresentationEvaluation, sqlx::Error> {
        let query = format!(
            "INSERT INTO presentation_evaluations
                (slot_id, evaluator_id, attendance, rubric, total_score, feedback)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {EVALUATION_COLUMNS}"
        );
        sqlx::query_as::<_, PresentationEvaluation>(&query)
            .bind(input.slot_id)
            .bind(input.evaluator_id)
            .bind(input.attendance.as_str())
            .bind(Json(&input.rubric))
            .bind(input.total_score)
            .bind(&input.feedback)
            .fetch_one(pool)
            .await
    }

    /// Evaluations recorded for a slot, oldest first.
    pub async fn list_evaluations_for_slot(
        pool: &PgPool,
        slot_id: DbId,
    ) -> Result<Vec<PresentationEvaluation>, sqlx::Error> {
        let query = format!(
            "SELECT {EVALUATION_COLUMNS} FROM presentation_evaluations
             WHERE slot_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, PresentationEvaluation>(&query)
            .bind(slot_id)
            .fetch_all(pool)
            .await
    }
}
