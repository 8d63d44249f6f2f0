use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The direction of a trade. The only two transaction types the system records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// The normalized, uppercase form stored in `transaction_history`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl FromStr for TradeSide {
    type Err = CoreError;

    /// Accepts the side case-insensitively ("buy", "Sell", "SELL", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            _ => Err(CoreError::InvalidTradeSide(s.to_string())),
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("Sell".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert_eq!("sell".parse::<TradeSide>().unwrap(), TradeSide::Sell);
    }

    #[test]
    fn unknown_side_is_rejected() {
        assert!("HOLD".parse::<TradeSide>().is_err());
        assert!("".parse::<TradeSide>().is_err());
    }

    #[test]
    fn side_normalizes_to_uppercase() {
        assert_eq!("buy".parse::<TradeSide>().unwrap().as_str(), "BUY");
        assert_eq!("sell".parse::<TradeSide>().unwrap().to_string(), "SELL");
    }
}
