use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mpms_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{"error": {"code", "message"}}`
/// envelope used by every failing endpoint.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mpms_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body was not valid JSON for the target type.
    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    /// No route matched the request.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status, stable error code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::JsonBody(rejection) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION",
                rejection.body_text(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                server_error()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

fn server_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "SERVER_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Duplicate(msg) => (StatusCode::CONFLICT, "DUPLICATE", msg.clone()),
        CoreError::InvalidState(msg) => (StatusCode::BAD_REQUEST, "INVALID_STATE", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Frozen(_) => (StatusCode::FORBIDDEN, "FROZEN", err.to_string()),
        CoreError::NotAccepting => (StatusCode::BAD_REQUEST, "NOT_ACCEPTING", err.to_string()),
        CoreError::CapacityFull => (StatusCode::BAD_REQUEST, "CAPACITY_FULL", err.to_string()),
        CoreError::AlreadyAllocated => {
            (StatusCode::BAD_REQUEST, "ALREADY_ALLOCATED", err.to_string())
        }
        CoreError::MaxPending { .. } => (StatusCode::BAD_REQUEST, "MAX_PENDING", err.to_string()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            server_error()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on the mentor request indexes map to the allocation
///   codes they guard; any other `uq_` constraint maps to 409 CONFLICT.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint().unwrap_or("unknown") {
                "uq_mentor_requests_pending_pair" => classify_core_error(&CoreError::Duplicate(
                    "You already have a pending request to this mentor".into(),
                )),
                "uq_mentor_requests_accepted_student" => {
                    classify_core_error(&CoreError::AlreadyAllocated)
                }
                "uq_users_email" => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "Email already registered".to_string(),
                ),
                constraint if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    server_error()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            server_error()
        }
    }
}
