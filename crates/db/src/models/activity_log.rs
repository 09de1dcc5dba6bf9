//! Append-only project activity log.

use mpms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: DbId,
    pub project_id: DbId,
    pub actor_id: DbId,
    pub action_type: String,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending a log entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub project_id: DbId,
    pub actor_id: DbId,
    pub action_type: &'static str,
    pub metadata: serde_json::Value,
}
