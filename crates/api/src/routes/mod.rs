pub mod admin;
pub mod auth;
pub mod evaluations;
pub mod health;
pub mod mentors;
pub mod presentations;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
///
/// /mentors                                         mentor directory
/// /mentors/requests                                list, create (student)
/// /mentors/requests/{id}                           accept / reject / withdraw (PATCH)
///
/// /projects/{id}/internal-evaluations              list, submit (mentor, admin)
/// /internal-evaluations/{id}/lock                  lock / unlock (admin, PATCH)
///
/// /presentations/slots/{id}/evaluation             submit (faculty, admin)
/// /presentations/slots/{id}/evaluations            list
///
/// /admin/users                                     list (admin)
/// /admin/users/{id}/role                           change role (admin, PATCH)
/// /admin/mentor-profiles/{user_id}                 update profile (admin, PATCH)
/// /admin/freeze-settings                           read freeze flags (admin)
/// /admin/freeze                                    patch flags (PATCH), toggle one (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/mentors", mentors::router())
        .nest("/projects", projects::router())
        .nest("/internal-evaluations", evaluations::router())
        .nest("/presentations", presentations::router())
        .nest("/admin", admin::router())
}
