//! # Cloudex Market Gate Crate
//!
//! Answers one question: "is the market open right now?" The decision combines
//! the configured open/close window with the holiday calendar, both persisted
//! in the database and read through `DbRepository`. There is no process-wide
//! mutable market state, so admin updates to the hours can never race an
//! in-flight gating check.
//!
//! ## Public API
//!
//! - `MarketGate`: the decision component guarding trade execution.
//! - `MarketStatus`: the three-way outcome (`Open`, `Closed`, `Holiday`).
//! - `MarketGateError`: missing configuration or storage failure.

use chrono::NaiveDateTime;
use core_types::MarketHours;
use database::DbRepository;

pub mod error;

pub use error::MarketGateError;

/// The gate's verdict for a given instant. `Closed` means outside the daily
/// window; `Holiday` means the window would be open but the date is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketStatus {
    Open,
    Closed,
    Holiday,
}

/// The open/closed/holiday decision component guarding trade execution.
#[derive(Debug, Clone)]
pub struct MarketGate {
    repo: DbRepository,
}

impl MarketGate {
    pub fn new(repo: DbRepository) -> Self {
        Self { repo }
    }

    /// Classifies the given local instant. The daily-window check runs first,
    /// so an out-of-hours request on a holiday reports `Closed`.
    pub async fn status_at(&self, now: NaiveDateTime) -> Result<MarketStatus, MarketGateError> {
        let hours = self
            .repo
            .get_market_hours()
            .await?
            .ok_or(MarketGateError::NotConfigured)?;

        if !is_within_hours(now.time(), &hours) {
            return Ok(MarketStatus::Closed);
        }

        if self.repo.is_holiday(now.date()).await? {
            return Ok(MarketStatus::Holiday);
        }

        Ok(MarketStatus::Open)
    }

    /// Folds `status_at` down to a bool for callers that do not care why the
    /// market is unavailable.
    pub async fn is_open(&self, now: NaiveDateTime) -> Result<bool, MarketGateError> {
        Ok(self.status_at(now).await? == MarketStatus::Open)
    }
}

/// True when the time-of-day falls within the trading window. Both bounds are
/// inclusive: a trade at exactly the open or the close is accepted.
pub fn is_within_hours(time: chrono::NaiveTime, hours: &MarketHours) -> bool {
    hours.open_time <= time && time <= hours.close_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn hours(open: (u32, u32), close: (u32, u32)) -> MarketHours {
        MarketHours {
            open_time: NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
        }
    }

    #[test]
    fn open_and_close_bounds_are_inclusive() {
        let window = hours((9, 30), (16, 0));
        assert!(is_within_hours(NaiveTime::from_hms_opt(9, 30, 0).unwrap(), &window));
        assert!(is_within_hours(NaiveTime::from_hms_opt(16, 0, 0).unwrap(), &window));
    }

    #[test]
    fn outside_the_window_is_closed() {
        let window = hours((9, 30), (16, 0));
        assert!(!is_within_hours(NaiveTime::from_hms_opt(9, 29, 59).unwrap(), &window));
        assert!(!is_within_hours(NaiveTime::from_hms_opt(16, 0, 1).unwrap(), &window));
        assert!(!is_within_hours(NaiveTime::from_hms_opt(3, 0, 0).unwrap(), &window));
    }

    #[test]
    fn midday_is_open() {
        let window = hours((9, 30), (16, 0));
        assert!(is_within_hours(NaiveTime::from_hms_opt(12, 15, 30).unwrap(), &window));
    }
}
