use axum::routing::{get, post};
use axum::Router;

use crate::handlers::presentations;
use crate::state::AppState;

/// Routes mounted at `/presentations`.
///
/// ```text
/// POST   /slots/{id}/evaluation             -> submit_evaluation
/// GET    /slots/{id}/evaluations            -> list_slot_evaluations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/slots/{id}/evaluation",
            post(presentations::submit_evaluation),
        )
        .route(
            "/slots/{id}/evaluations",
            get(presentations::list_slot_evaluations),
        )
}
