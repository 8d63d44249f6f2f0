use crate::error::SimulatorError;
use async_trait::async_trait;
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// The source of the next price for an instrument.
///
/// This is the seam that keeps the rest of the system honest about where
/// prices come from: the trade executor and every read path only ever see the
/// stocks table, so replacing the random walk with a real market feed means
/// implementing this trait and touching nothing else.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// The next price for one instrument, given its current price.
    async fn next_price(&self, symbol: &str, current_price: Decimal)
        -> Result<Decimal, SimulatorError>;
}

/// A bounded random walk: each tick moves the price by a uniform percentage
/// in `[-drift_pct, +drift_pct]`, floored at `min_price` so a price can never
/// reach zero or go negative.
#[derive(Debug, Clone)]
pub struct RandomWalkFeed {
    drift_pct: Decimal,
    min_price: Decimal,
}

impl RandomWalkFeed {
    pub fn new(drift_pct: Decimal, min_price: Decimal) -> Self {
        Self { drift_pct, min_price }
    }

    fn drifted(&self, current_price: Decimal) -> Decimal {
        // The draw itself is the only float in the pipeline; it is converted
        // back to a Decimal before touching the price.
        let bound = self.drift_pct.to_f64().unwrap_or(0.0).abs();
        let pct = rand::thread_rng().gen_range(-bound..=bound);
        let change = current_price * Decimal::from_f64(pct).unwrap_or(Decimal::ZERO);

        let new_price = current_price + change;
        if new_price < self.min_price {
            self.min_price
        } else {
            new_price
        }
    }
}

#[async_trait]
impl PriceFeed for RandomWalkFeed {
    async fn next_price(
        &self,
        _symbol: &str,
        current_price: Decimal,
    ) -> Result<Decimal, SimulatorError> {
        Ok(self.drifted(current_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn drift_stays_within_the_configured_bound() {
        let feed = RandomWalkFeed::new(dec!(0.01), dec!(0.01));
        let price = dec!(100.00);
        for _ in 0..500 {
            let next = feed.drifted(price);
            assert!(next >= dec!(99.00), "drifted below -1%: {next}");
            assert!(next <= dec!(101.00), "drifted above +1%: {next}");
        }
    }

    #[test]
    fn price_is_floored_at_the_minimum() {
        let feed = RandomWalkFeed::new(dec!(0.01), dec!(0.01));
        // At the floor already: no draw can push the price below it.
        for _ in 0..500 {
            assert!(feed.drifted(dec!(0.01)) >= dec!(0.01));
        }
    }

    #[test]
    fn zero_drift_leaves_the_price_unchanged() {
        let feed = RandomWalkFeed::new(dec!(0), dec!(0.01));
        assert_eq!(feed.drifted(dec!(42.00)), dec!(42.00));
    }
}
