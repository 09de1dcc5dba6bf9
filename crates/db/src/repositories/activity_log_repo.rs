//! Repository for the append-only `activity_logs` table.

use mpms_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

const COLUMNS: &str = "id, project_id, actor_id, action_type, metadata, created_at";

pub struct ActivityLogRepo;

impl ActivityLogRepo {
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO activity_logs (project_id, actor_id, action_type, metadata)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.project_id)
            .bind(input.actor_id)
            .bind(input.action_type)
            .bind(&input.metadata)
            .fetch_one(executor)
            .await
    }

    /// Entries of a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
