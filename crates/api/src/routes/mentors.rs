//! Route definitions for the `/mentors` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::mentors;
use crate::state::AppState;

/// Routes mounted at `/mentors`.
///
/// ```text
/// GET    /                                  -> list_mentors
/// GET    /requests                          -> list_requests
/// POST   /requests                          -> create_request
/// PATCH  /requests/{id}                     -> update_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mentors::list_mentors))
        .route(
            "/requests",
            get(mentors::list_requests).post(mentors::create_request),
        )
        .route("/requests/{id}", patch(mentors::update_request))
}
