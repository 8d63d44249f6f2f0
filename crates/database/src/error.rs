use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested record was not found.")]
    NotFound,

    /// A unique constraint was violated. Carries the caller-facing message
    /// (e.g., which symbol already exists).
    #[error("{0}")]
    Conflict(String),

    #[error("Insufficient funds.")]
    InsufficientFunds,

    /// The pool's bounded `acquire_timeout` elapsed. Retryable by the caller.
    #[error("Timed out waiting for a database connection.")]
    PoolTimeout,

    #[error("Database query failed: {0}")]
    QueryError(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::PoolTimedOut => DbError::PoolTimeout,
            other => DbError::QueryError(other),
        }
    }
}

impl DbError {
    /// Maps a unique-constraint violation to `Conflict` with the given
    /// caller-facing message; everything else converts as usual.
    pub fn on_unique_violation(err: sqlx::Error, message: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => DbError::Conflict(message.into()),
            _ => DbError::from(err),
        }
    }
}
