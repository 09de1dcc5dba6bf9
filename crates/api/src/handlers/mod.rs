//! HTTP handlers, one module per resource.
//!
//! Handlers gather inputs from the repositories and call into
//! `mpms_core` for every decision, checking preconditions in the order the
//! error codes are documented.

pub mod admin;
pub mod auth;
pub mod evaluations;
pub mod mentors;
pub mod presentations;

use std::collections::HashMap;

use mpms_core::freeze::FreezeTarget;
use mpms_core::types::DbId;
use mpms_db::models::user::UserSummary;
use mpms_db::repositories::{FreezeSettingsRepo, UserRepo};
use mpms_db::DbPool;

use crate::error::{AppError, AppResult};

/// Fail with FROZEN if `target` is frozen. Reads the flags fresh on every call.
pub(crate) async fn ensure_not_frozen(pool: &DbPool, target: FreezeTarget) -> AppResult<()> {
    let flags = FreezeSettingsRepo::flags(pool).await?;
    flags.ensure_open(target).map_err(AppError::from)
}

/// Load the users referenced by a listing in a single query, keyed by id.
pub(crate) async fn user_directory(
    pool: &DbPool,
    ids: impl IntoIterator<Item = DbId>,
) -> AppResult<HashMap<DbId, UserSummary>> {
    let mut ids: Vec<DbId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    let users = UserRepo::find_summaries(pool, &ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}
