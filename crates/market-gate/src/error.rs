use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketGateError {
    /// The single market_hours row is missing. Never treated as silently open
    /// or closed; callers must surface this as a server-side fault.
    #[error("Market hours not configured.")]
    NotConfigured,

    #[error(transparent)]
    Database(#[from] database::DbError),
}
