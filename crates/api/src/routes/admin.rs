//! Route definitions for the `/admin` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every route requires the ADMIN role.
///
/// ```text
/// GET    /users                             -> list_users
/// PATCH  /users/{id}/role                   -> change_role
/// PATCH  /mentor-profiles/{user_id}         -> update_mentor_profile
/// GET    /freeze-settings                   -> get_freeze_settings
/// PATCH  /freeze                            -> patch_freeze_settings
/// POST   /freeze                            -> toggle_freeze
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/role", patch(admin::change_role))
        .route(
            "/mentor-profiles/{user_id}",
            patch(admin::update_mentor_profile),
        )
        .route("/freeze-settings", get(admin::get_freeze_settings))
        .route(
            "/freeze",
            patch(admin::patch_freeze_settings).post(admin::toggle_freeze),
        )
}
