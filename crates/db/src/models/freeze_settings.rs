//! The singleton freeze settings row.

use mpms_core::freeze::FreezeFlags;
use mpms_core::types::Timestamp;
use sqlx::FromRow;

/// Fixed primary key of the only row in `freeze_settings`.
pub const FREEZE_SETTINGS_ID: &str = "freeze_settings";

#[derive(Debug, Clone, FromRow)]
pub struct FreezeSettings {
    pub id: String,
    pub allocation: bool,
    pub internal_marks: bool,
    pub presentations: bool,
    /// Bumped on every write.
    pub version: i64,
    pub updated_at: Timestamp,
}

impl FreezeSettings {
    pub fn flags(&self) -> FreezeFlags {
        FreezeFlags {
            allocation: self.allocation,
            internal_marks: self.internal_marks,
            presentations: self.presentations,
        }
    }
}
