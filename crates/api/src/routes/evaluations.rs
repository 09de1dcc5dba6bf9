use axum::routing::patch;
use axum::Router;

use crate::handlers::evaluations;
use crate::state::AppState;

/// Routes mounted at `/internal-evaluations`.
///
/// ```text
/// PATCH  /{id}/lock                         -> lock_internal
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/lock", patch(evaluations::lock_internal))
}
