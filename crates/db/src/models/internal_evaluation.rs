//! Internal (mentor-entered) evaluation model and DTOs.

use mpms_core::evaluation::ScoreSheet;
use mpms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `internal_evaluations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalEvaluation {
    pub id: DbId,
    pub project_id: DbId,
    pub student_id: DbId,
    pub mentor_id: DbId,
    pub criteria: Json<ScoreSheet>,
    pub total_score: f64,
    pub remarks: String,
    pub locked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the first submission of a (project, student, mentor) evaluation.
#[derive(Debug, Clone)]
pub struct CreateInternalEvaluation {
    pub project_id: DbId,
    pub student_id: DbId,
    pub mentor_id: DbId,
    pub criteria: ScoreSheet,
    pub total_score: f64,
    pub remarks: String,
}

/// DTO for a resubmission. Absent fields keep their stored value.
#[derive(Debug, Clone)]
pub struct UpdateInternalEvaluation {
    pub criteria: Option<ScoreSheet>,
    pub total_score: f64,
    pub remarks: Option<String>,
}
