use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy shared by every layer.
///
/// The first four variants are domain outcomes that map to caller-visible
/// rejections; the rest are infrastructure failures surfaced as 500s.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidData(String),
    #[error("{0}")]
    BusinessRuleViolation(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    UnauthorizedOperation(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("database query failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows were affected: {0}")]
    NoRowsAffectedError(String),
    #[error("failed to begin or commit a transaction")]
    TransactionError(#[source] sqlx::Error),
    #[error("{0}")]
    ExternalServiceError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AppError::InvalidData(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthorizedOperation(_) => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BusinessRuleViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ref e @ (AppError::ConversionEntityError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::TransactionError(_)
            | AppError::ExternalServiceError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e, error.message = %e,
                    "unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
