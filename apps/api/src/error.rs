//! # API Error Type
//!
//! Maps every failure a handler can see onto an HTTP status and a JSON body.
//!
//! ## Mapping
//! ```text
//! ┌──────────────────────────────────────────┬────────┬─────────────────────┐
//! │ Source                                   │ Status │ code                │
//! ├──────────────────────────────────────────┼────────┼─────────────────────┤
//! │ ValidationError, AmountOverflow, bad body│ 400    │ VALIDATION_ERROR    │
//! │ malformed path or query                  │ 400    │ VALIDATION_ERROR    │
//! │ DbError::ForeignKeyViolation             │ 400    │ INVALID_REFERENCE   │
//! │ DbError::ConstraintViolation             │ 400    │ VALIDATION_ERROR    │
//! │ ProductNotFound, DbError::NotFound       │ 404    │ NOT_FOUND           │
//! │ InsufficientStock                        │ 409    │ INSUFFICIENT_STOCK  │
//! │ DbError::UniqueViolation                 │ 409    │ CONFLICT            │
//! │ any other storage failure                │ 500    │ INTERNAL_ERROR      │
//! └──────────────────────────────────────────┴────────┴─────────────────────┘
//! ```
//!
//! Body: `{ "code": "...", "message": "..." }`. Internal details of 500s are
//! logged, never returned.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use kasir_core::{CoreError, ValidationError};
use kasir_db::{DbError, SalesError};

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input rejected before storage was touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Checkout or report failure.
    #[error(transparent)]
    Sales(#[from] SalesError),

    /// Repository failure.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Lookup by id found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Request body, path or query string could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        ApiError::NotFound { entity, id }
    }

    /// Status, machine-readable code and client-facing message.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Validation(err) => validation(err.to_string()),
            ApiError::BadRequest(msg) => validation(msg.clone()),
            ApiError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            ApiError::Sales(SalesError::Core(core)) => match core {
                CoreError::Validation(_) | CoreError::AmountOverflow { .. } => {
                    validation(core.to_string())
                }
                CoreError::ProductNotFound(_) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::InsufficientStock { .. } => (
                    StatusCode::CONFLICT,
                    "INSUFFICIENT_STOCK",
                    core.to_string(),
                ),
            },
            ApiError::Sales(SalesError::Storage(db)) | ApiError::Db(db) => classify_db_error(db),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn validation(message: String) -> (StatusCode, &'static str, String) {
    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
}

/// Classify a repository error into an HTTP status, error code, and message.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, String) {
    match err {
        DbError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        DbError::UniqueViolation { .. } => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        DbError::ForeignKeyViolation { .. } => (
            StatusCode::BAD_REQUEST,
            "INVALID_REFERENCE",
            "Referenced record does not exist".to_string(),
        ),
        DbError::ConstraintViolation { .. } => validation(err.to_string()),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode, &str)> = vec![
            (
                ValidationError::Required {
                    field: "items".to_string(),
                }
                .into(),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                SalesError::from(CoreError::ProductNotFound(9)).into(),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                SalesError::from(CoreError::InsufficientStock {
                    product_id: 1,
                    name: "Indomie".to_string(),
                    available: 1,
                    requested: 2,
                })
                .into(),
                StatusCode::CONFLICT,
                "INSUFFICIENT_STOCK",
            ),
            (
                SalesError::from(CoreError::AmountOverflow { product_id: 1 }).into(),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                DbError::ForeignKeyViolation {
                    message: "FOREIGN KEY constraint failed".to_string(),
                }
                .into(),
                StatusCode::BAD_REQUEST,
                "INVALID_REFERENCE",
            ),
            (
                DbError::UniqueViolation {
                    field: "categories.name".to_string(),
                    value: "unknown".to_string(),
                }
                .into(),
                StatusCode::CONFLICT,
                "CONFLICT",
            ),
            (
                ApiError::not_found("Product", 3),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
        ];

        for (err, status, code) in cases {
            let (got_status, got_code, _) = err.parts();
            assert_eq!(got_status, status, "{err}");
            assert_eq!(got_code, code, "{err}");
        }
    }

    #[test]
    fn test_storage_errors_are_sanitized() {
        let err = ApiError::from(SalesError::from(DbError::QueryFailed(
            "no such table: products".to_string(),
        )));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert!(!message.contains("products"));
    }
}
