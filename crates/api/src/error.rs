use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vitrine_core::error::CoreError;
use vitrine_core::ordering::PlacementError;
use vitrine_db::repositories::RepoError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`PlacementError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses; every rejection carries a specific `code` so the
/// optimistically-mutating console knows exactly what to roll back and
/// whether a retry makes sense (only `CONFLICT` does).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A generic domain error from `vitrine_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A placement engine rejection.
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Placement(e) => AppError::Placement(e),
            RepoError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    None,
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- Placement engine rejections ---
            AppError::Placement(placement) => {
                let message = placement.to_string();
                match placement {
                    PlacementError::SpaceNotFound { .. } => {
                        (StatusCode::NOT_FOUND, "SPACE_NOT_FOUND", message, None)
                    }
                    PlacementError::BannerNotFound { .. } => {
                        (StatusCode::NOT_FOUND, "BANNER_NOT_FOUND", message, None)
                    }
                    PlacementError::NotPlaced { .. } => {
                        (StatusCode::NOT_FOUND, "NOT_PLACED", message, None)
                    }
                    PlacementError::AlreadyAttached { .. } => {
                        (StatusCode::CONFLICT, "ALREADY_ATTACHED", message, None)
                    }
                    PlacementError::CapacityExceeded { current, max } => (
                        StatusCode::CONFLICT,
                        "CAPACITY_EXCEEDED",
                        message,
                        Some(json!({ "current": current, "max": max })),
                    ),
                    PlacementError::InvalidWindow(_) => {
                        (StatusCode::BAD_REQUEST, "INVALID_WINDOW", message, None)
                    }
                    PlacementError::OrderMismatch(_) => {
                        (StatusCode::CONFLICT, "ORDER_MISMATCH", message, None)
                    }
                    // The only retryable rejection: refetch and replay.
                    PlacementError::Conflict { expected, actual } => (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        message,
                        Some(json!({ "expected": expected, "actual": actual })),
                    ),
                }
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`)
///   map to 409 `DUPLICATE` (distinct from the retryable `CONFLICT`).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(
    err: &sqlx::Error,
) -> (StatusCode, &'static str, String, Option<serde_json::Value>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "DUPLICATE",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                        None,
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            )
        }
    }
}
