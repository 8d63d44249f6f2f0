use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Malformed or economically meaningless input. Expected and user-facing.
    #[error("{0}")]
    Validation(String),

    #[error("Insufficient funds. Current balance: ${available:.2}. Required for purchase: ${required:.2}.")]
    InsufficientFunds { available: Decimal, required: Decimal },

    #[error("Insufficient shares to complete this sale. Owned: {available}, requested: {requested}.")]
    InsufficientShares { available: Decimal, requested: Decimal },

    #[error("User ID {0} not found.")]
    UserNotFound(i64),

    #[error("Stock ID {0} not found.")]
    StockNotFound(i64),

    /// The pool's bounded acquire timeout elapsed before the trade started.
    /// Retryable by the caller; nothing was written.
    #[error("Timed out waiting for a database connection.")]
    PoolTimeout,

    /// Connectivity or transaction failure. The in-flight transaction rolls
    /// back; callers see an opaque server error.
    #[error("Trade execution failed: {0}")]
    Storage(sqlx::Error),
}

impl From<sqlx::Error> for ExecutorError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => ExecutorError::PoolTimeout,
            other => ExecutorError::Storage(other),
        }
    }
}

impl From<core_types::CoreError> for ExecutorError {
    fn from(err: core_types::CoreError) -> Self {
        ExecutorError::Validation(err.to_string())
    }
}
