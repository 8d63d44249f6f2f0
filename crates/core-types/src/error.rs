use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid transaction_type '{0}'. Must be 'BUY' or 'SELL'.")]
    InvalidTradeSide(String),
}
