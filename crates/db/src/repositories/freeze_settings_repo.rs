//! Repository for the singleton `freeze_settings` row.

use mpms_core::freeze::{FreezeFlags, FreezePatch};
use sqlx::PgPool;

use crate::models::freeze_settings::{FreezeSettings, FREEZE_SETTINGS_ID};

const COLUMNS: &str = "id, allocation, internal_marks, presentations, version, updated_at";

pub struct FreezeSettingsRepo;

impl FreezeSettingsRepo {
    /// Read the settings row, creating it with every flag off on first use.
    ///
    /// The insert only runs when the row is missing, so steady-state reads
    /// never write.
    pub async fn get(pool: &PgPool) -> Result<FreezeSettings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM freeze_settings WHERE id = $1");
        let existing = sqlx::query_as::<_, FreezeSettings>(&query)
            .bind(FREEZE_SETTINGS_ID)
            .fetch_optional(pool)
            .await?;
        if let Some(settings) = existing {
            return Ok(settings);
        }

        sqlx::query("INSERT INTO freeze_settings (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(FREEZE_SETTINGS_ID)
            .execute(pool)
            .await?;

        sqlx::query_as::<_, FreezeSettings>(&query)
            .bind(FREEZE_SETTINGS_ID)
            .fetch_one(pool)
            .await
    }

    /// Current flags. Called by every gated operation.
    pub async fn flags(pool: &PgPool) -> Result<FreezeFlags, sqlx::Error> {
        Ok(Self::get(pool).await?.flags())
    }

    /// Apply a partial update in a single statement.
    ///
    /// Flags absent from `patch` keep their value; a missing row is created
    /// with the absent flags off.
    pub async fn patch(pool: &PgPool, patch: &FreezePatch) -> Result<FreezeSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO freeze_settings (id, allocation, internal_marks, presentations, version)
             VALUES ($1, COALESCE($2, false), COALESCE($3, false), COALESCE($4, false), 1)
             ON CONFLICT (id) DO UPDATE SET
                allocation = COALESCE($2, freeze_settings.allocation),
                internal_marks = COALESCE($3, freeze_settings.internal_marks),
                presentations = COALESCE($4, freeze_settings.presentations),
                version = freeze_settings.version + 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FreezeSettings>(&query)
            .bind(FREEZE_SETTINGS_ID)
            .bind(patch.allocation)
            .bind(patch.internal_marks)
            .bind(patch.presentations)
            .fetch_one(pool)
            .await
    }
}
