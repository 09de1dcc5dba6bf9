//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity matching a table row and the
//! `Create*` / `Update*` inputs its repository accepts. Entities serialize
//! with camelCase field names, the HTTP wire format.

pub mod activity_log;
pub mod freeze_settings;
pub mod internal_evaluation;
pub mod mentor_profile;
pub mod mentor_request;
pub mod presentation;
pub mod project;
pub mod user;
