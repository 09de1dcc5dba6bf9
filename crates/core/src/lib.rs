//! Domain logic for the MPMS allocation and evaluation workflows.
//!
//! Everything in this crate is pure: no database or HTTP types. The `db`
//! crate persists these types and the `api` crate exposes them over HTTP.

pub mod allocation;
pub mod error;
pub mod evaluation;
pub mod freeze;
pub mod registration;
pub mod roles;
pub mod status;
pub mod types;
