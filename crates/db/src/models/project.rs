//! Project and project membership models.

use mpms_core::status::{MemberRole, ProjectStatus};
use mpms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub mentor_id: Option<DbId>,
    pub tech_stack: Vec<String>,
    pub max_team_size: i32,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub mentor_id: Option<DbId>,
    pub tech_stack: Vec<String>,
    pub status: ProjectStatus,
}

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub member_role: MemberRole,
    pub joined_at: Timestamp,
}
