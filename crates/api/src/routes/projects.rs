//! Route definitions for project-scoped evaluation endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::evaluations;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /{id}/internal-evaluations         -> list_internal
/// POST   /{id}/internal-evaluations         -> submit_internal
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/internal-evaluations",
        get(evaluations::list_internal).post(evaluations::submit_internal),
    )
}
