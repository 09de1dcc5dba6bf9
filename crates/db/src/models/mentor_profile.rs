//! Mentor profile model: capacity counters and specialization tags.

use mpms_core::allocation::MentorCapacity;
use mpms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `mentor_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub specialization_tags: Vec<String>,
    pub capacity: i32,
    pub current_load: i32,
    pub accepting_requests: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MentorProfile {
    pub fn capacity(&self) -> MentorCapacity {
        MentorCapacity {
            capacity: self.capacity,
            current_load: self.current_load,
            accepting_requests: self.accepting_requests,
        }
    }
}

/// Admin update of a mentor profile. All fields are optional.
///
/// `current_load` is not editable here; it only moves on acceptance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMentorProfile {
    pub capacity: Option<i32>,
    pub accepting_requests: Option<bool>,
    pub specialization_tags: Option<Vec<String>>,
}

/// A mentor user joined with their (possibly missing) profile.
#[derive(Debug, Clone, FromRow)]
pub struct MentorListing {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub specialization_tags: Option<Vec<String>>,
    pub capacity: Option<i32>,
    pub current_load: Option<i32>,
    pub accepting_requests: Option<bool>,
}

impl MentorListing {
    /// Counters of the profile; a mentor without one has no slots and is closed.
    pub fn capacity(&self) -> MentorCapacity {
        MentorCapacity {
            capacity: self.capacity.unwrap_or(0),
            current_load: self.current_load.unwrap_or(0),
            accepting_requests: self.accepting_requests.unwrap_or(false),
        }
    }
}
