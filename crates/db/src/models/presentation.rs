//! Presentation events, slots and the evaluations recorded against slots.

use mpms_core::evaluation::{Attendance, ScoreSheet};
use mpms_core::status::{PresentationKind, SlotAssignee};
use mpms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `presentation_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationEvent {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub event_type: PresentationKind,
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub duration_minutes: i32,
    pub created_by_id: DbId,
    pub locked: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePresentationEvent {
    pub event_type: PresentationKind,
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Defaults to 15 if omitted.
    pub duration_minutes: Option<i32>,
    pub created_by_id: DbId,
}

/// A row from the `presentation_slots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSlot {
    pub id: DbId,
    pub event_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub venue: String,
    #[sqlx(try_from = "String")]
    pub assigned_to_type: SlotAssignee,
    pub project_id: Option<DbId>,
    pub student_id: Option<DbId>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePresentationSlot {
    pub event_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub venue: String,
    pub assigned_to_type: SlotAssignee,
    pub project_id: Option<DbId>,
    pub student_id: Option<DbId>,
}

/// A row from the `presentation_evaluations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationEvaluation {
    pub id: DbId,
    pub slot_id: DbId,
    pub evaluator_id: DbId,
    #[sqlx(try_from = "String")]
    pub attendance: Attendance,
    pub rubric: Json<ScoreSheet>,
    pub total_score: f64,
    pub feedback: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePresentationEvaluation {
    pub slot_id: DbId,
    pub evaluator_id: DbId,
    pub attendance: Attendance,
    pub rubric: ScoreSheet,
    pub total_score: f64,
    pub feedback: String,
}
