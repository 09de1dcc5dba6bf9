//! Request extractors whose rejections use the JSON error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] as a request body extractor.
///
/// Malformed bodies are rejected with `400 VALIDATION` in the standard
/// error envelope instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
