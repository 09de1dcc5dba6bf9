//! Repository for the `projects` and `project_members` tables.

use mpms_core::status::MemberRole;
use mpms_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::project::{CreateProject, Project, ProjectMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, mentor_id, tech_stack, max_team_size, status, \
    created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, project_id, user_id, member_role, joined_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateProject) -> Result<Project, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO projects (title, description, mentor_id, tech_stack, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.mentor_id)
            .bind(&input.tech_stack)
            .bind(input.status.as_str())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Provides access to project membership.
pub struct ProjectMemberRepo;

impl ProjectMemberRepo {
    /// Add `user_id` to a project.
    ///
    /// Fails with a unique violation on `uq_project_members_project_user`
    /// if the user is already a member.
    pub async fn add<'e, E>(
        executor: E,
        project_id: DbId,
        user_id: DbId,
        role: MemberRole,
    ) -> Result<ProjectMember, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO project_members (project_id, user_id, member_role)
             VALUES ($1, $2, $3)
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(executor)
            .await
    }

    /// The membership of `user_id` in a project, if any.
    pub async fn find(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<ProjectMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM project_members WHERE project_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM project_members WHERE project_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
