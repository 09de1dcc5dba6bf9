use crate::freeze::FreezeTarget;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{}", .0.frozen_message())]
    Frozen(FreezeTarget),

    #[error("Mentor is not accepting requests")]
    NotAccepting,

    #[error("Mentor has reached full capacity")]
    CapacityFull,

    #[error("You already have a mentor assigned")]
    AlreadyAllocated,

    #[error("Maximum {limit} pending requests allowed")]
    MaxPending { limit: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}
