use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use executor::ExecutorError;
use market_gate::MarketGateError;
use serde_json::json;
use thiserror::Error;

/// The web layer's error taxonomy. Business-rule and validation rejections are
/// expected and user-facing; storage failures are logged and surfaced as an
/// opaque 500 without leaking internal detail.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// The market gate rejected the trade (outside hours or holiday).
    #[error("{0}")]
    MarketClosed(String),
    #[error("Market hours not configured.")]
    MarketHoursNotConfigured,
    /// Bounded pool-acquire timeout. Retryable by the caller.
    #[error("The service is temporarily unavailable. Please retry.")]
    ServiceUnavailable,
    #[error("Internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Database(DbError),
    #[error(transparent)]
    Executor(ExecutorError),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => AppError::NotFound("The requested record was not found.".to_string()),
            DbError::Conflict(message) => AppError::Conflict(message),
            DbError::InsufficientFunds => AppError::Validation("Insufficient funds.".to_string()),
            DbError::PoolTimeout => AppError::ServiceUnavailable,
            other => AppError::Database(other),
        }
    }
}

impl From<ExecutorError> for AppError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::Validation(_)
            | ExecutorError::InsufficientFunds { .. }
            | ExecutorError::InsufficientShares { .. } => AppError::Validation(err.to_string()),
            ExecutorError::UserNotFound(_) | ExecutorError::StockNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ExecutorError::PoolTimeout => AppError::ServiceUnavailable,
            other => AppError::Executor(other),
        }
    }
}

impl From<MarketGateError> for AppError {
    fn from(err: MarketGateError) -> Self {
        match err {
            MarketGateError::NotConfigured => AppError::MarketHoursNotConfigured,
            MarketGateError::Database(db) => AppError::from(db),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(message) | AppError::MarketClosed(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Conflict(message) => (StatusCode::CONFLICT, message),
            AppError::MarketHoursNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Market hours not configured.".to_string(),
            ),
            AppError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The service is temporarily unavailable. Please retry.".to_string(),
            ),
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
            AppError::Executor(exec_err) => {
                tracing::error!(error = ?exec_err, "Trade execution error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn business_rejections_map_to_400() {
        let funds: AppError = ExecutorError::InsufficientFunds {
            available: Decimal::new(100, 2),
            required: Decimal::new(500, 2),
        }
        .into();
        assert_eq!(funds.into_response().status(), StatusCode::BAD_REQUEST);

        let shares: AppError = ExecutorError::InsufficientShares {
            available: Decimal::ZERO,
            requested: Decimal::ONE,
        }
        .into();
        assert_eq!(shares.into_response().status(), StatusCode::BAD_REQUEST);

        let closed = AppError::MarketClosed("Market is currently closed.".to_string());
        assert_eq!(closed.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_failures_map_to_404() {
        let user: AppError = ExecutorError::UserNotFound(7).into();
        assert_eq!(user.into_response().status(), StatusCode::NOT_FOUND);

        let record: AppError = DbError::NotFound.into();
        assert_eq!(record.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicates_map_to_409() {
        let conflict: AppError = DbError::Conflict("The stock symbol 'AAPL' already exists.".to_string()).into();
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn pool_timeouts_are_retryable_503s() {
        let db: AppError = DbError::PoolTimeout.into();
        assert_eq!(db.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let exec: AppError = ExecutorError::PoolTimeout.into();
        assert_eq!(exec.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn missing_market_config_is_a_500() {
        let err: AppError = MarketGateError::NotConfigured.into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
