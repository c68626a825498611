//! # API Error
//!
//! What an HTTP client sees when a request fails.
//!
//! ## Mapping
//! ```text
//! ┌──────────────────────────────────────────┬────────────────────┬────────┐
//! │ Source                                   │ code               │ status │
//! ├──────────────────────────────────────────┼────────────────────┼────────┤
//! │ ValidationError, constraint violations   │ VALIDATION_ERROR   │ 400    │
//! │ DbError::NotFound, MedicineNotFound      │ NOT_FOUND          │ 404    │
//! │ CheckoutError::InsufficientStock         │ INSUFFICIENT_STOCK │ 409    │
//! │ Other DbError, CheckoutError::Commit     │ DATABASE_ERROR     │ 500    │
//! │ DbError::Internal                        │ INTERNAL           │ 500    │
//! └──────────────────────────────────────────┴────────────────────┴────────┘
//! ```
//!
//! Internal failures are logged with their cause; the response carries a
//! generic message only.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pharmacy_core::ValidationError;
use pharmacy_db::{CheckoutError, DbError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    InsufficientStock,
    DatabaseError,
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InsufficientStock => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    fn database(cause: &DbError) -> Self {
        error!(error = %cause, "Database failure");
        ApiError::new(ErrorCode::DatabaseError, "A database error occurred")
    }

    fn internal(cause: &dyn std::fmt::Display) -> Self {
        error!(error = %cause, "Internal failure");
        ApiError::new(ErrorCode::Internal, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. }
            | DbError::CheckViolation { .. }
            | DbError::ForeignKeyViolation { .. } => ApiError::validation(err.to_string()),
            DbError::Internal(_) => ApiError::internal(&err),
            other => ApiError::database(&other),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Validation(e) => e.into(),
            CheckoutError::MedicineNotFound(_) => ApiError::not_found(err.to_string()),
            CheckoutError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CheckoutError::Commit(e) => ApiError::database(&e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InsufficientStock.status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_shape() {
        let err = ApiError::not_found("Medicine not found: 7");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Medicine not found: 7");
    }

    #[test]
    fn test_checkout_mapping() {
        let err: ApiError = CheckoutError::InsufficientStock {
            medicine: "Paracetamol 500mg".to_string(),
            available: 2,
            requested: 3,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("Paracetamol 500mg"));

        let err: ApiError = CheckoutError::MedicineNotFound(99).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError =
            CheckoutError::Commit(DbError::TransactionFailed("disk full".to_string())).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk full"));

        let err: ApiError =
            CheckoutError::Commit(DbError::duplicate("invoice_number", "INV-20261019-000001"))
                .into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("INV-"));
    }

    #[test]
    fn test_db_mapping() {
        let err: ApiError = DbError::not_found("Medicine", 3).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = DbError::duplicate("mobile_number", "9876543210").into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err: ApiError = DbError::Internal("worker thread crashed".to_string()).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Internal server error");
    }
}
