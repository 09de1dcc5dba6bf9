//! Token and password primitives.
//!
//! - [`jwt`] -- HS256 access-token generation and validation.
//! - [`password`] -- Argon2id hashing and strength checks.

pub mod jwt;
pub mod password;
