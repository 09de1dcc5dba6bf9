//! Mentor request entity model and DTOs.

use mpms_core::allocation::RequestParties;
use mpms_core::status::RequestStatus;
use mpms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `mentor_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRequest {
    pub id: DbId,
    pub student_id: DbId,
    pub mentor_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub message: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MentorRequest {
    pub fn parties(&self) -> RequestParties {
        RequestParties {
            student_id: self.student_id,
            mentor_id: self.mentor_id,
        }
    }
}

/// DTO for inserting a new PENDING request.
#[derive(Debug, Clone)]
pub struct CreateMentorRequest {
    pub student_id: DbId,
    pub mentor_id: DbId,
    pub message: String,
}
