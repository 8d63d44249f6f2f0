//! # Cloudex Simulator Crate
//!
//! The market simulation background tasks: the price drift that stands in for
//! a real market feed, and the portfolio snapshotter that records position
//! values for the daily-change calculation.
//!
//! ## Architectural Principles
//!
//! - **Swappable Feed:** price generation hides behind the `PriceFeed` trait.
//!   The bundled `RandomWalkFeed` is a simulation stub; a real feed replaces
//!   it without touching the trade executor or any read path.
//! - **Benign Races:** both tasks write in bulk and take none of the locks
//!   trades take. A trade prices against whatever was current at its price
//!   read; that is the intended semantics, not an oversight.
//!
//! ## Public API
//!
//! - `PriceFeed` / `RandomWalkFeed`: the price-source seam and its stub.
//! - `PriceSimulator` / `PortfolioSnapshotter`: the per-tick passes.
//! - `run_price_loop` / `run_snapshot_loop`: the interval drivers.

use std::time::Duration;

// Declare the modules that constitute this crate.
pub mod drift;
pub mod error;
pub mod feed;
pub mod snapshotter;

// Re-export the key components to provide a clean, public-facing API.
pub use drift::PriceSimulator;
pub use error::SimulatorError;
pub use feed::{PriceFeed, RandomWalkFeed};
pub use snapshotter::PortfolioSnapshotter;

/// Drives the price simulator forever. A failed pass is logged and the loop
/// keeps going; one bad tick must not stop the market.
pub async fn run_price_loop(simulator: PriceSimulator, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        match simulator.drift_once().await {
            Ok(updated) => tracing::debug!(updated, "Price drift pass complete."),
            Err(e) => tracing::error!(error = ?e, "Price drift pass failed."),
        }
    }
}

/// Drives the portfolio snapshotter forever, independently of trades.
pub async fn run_snapshot_loop(snapshotter: PortfolioSnapshotter, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        match snapshotter.snapshot_once().await {
            Ok(updated) => tracing::debug!(updated, "Portfolio snapshot pass complete."),
            Err(e) => tracing::error!(error = ?e, "Portfolio snapshot pass failed."),
        }
    }
}
