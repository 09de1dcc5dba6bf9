//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` role.
//! - [`rbac::RequireStudent`] -- Requires the `STUDENT` role.
//! - [`rbac::RequireMentorOrAdmin`] -- Requires `MENTOR` or `ADMIN`.
//! - [`rbac::RequireFacultyOrAdmin`] -- Requires `PBL_FACULTY` or `ADMIN`.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
