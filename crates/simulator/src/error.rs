use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    /// A price feed failed to produce a quote. The random-walk feed never
    /// fails; this exists for real feed implementations behind the same trait.
    #[error("Price feed error: {0}")]
    Feed(String),

    #[error("Database query failed: {0}")]
    Storage(#[from] sqlx::Error),
}
