//! # Cloudex Executor Crate
//!
//! This crate is the trade-execution core: the only component that mutates
//! balance and position state for trades, and the only one with multi-row
//! atomicity requirements.
//!
//! ## Architectural Principles
//!
//! - **Arithmetic vs. I/O Decoupling:** `TradePlan::compute` is a pure
//!   calculator that validates a trade and derives the exact post-trade state
//!   (cash, shares, weighted-average cost) with no side effects. The
//!   `TradeExecutor` is the thin transactional shell that applies a plan under
//!   the account's row lock. This separation is what makes the numeric
//!   invariants unit-testable without a database.
//! - **Pessimistic Locking:** the account balance row is read with
//!   `SELECT ... FOR UPDATE` and stays locked until commit. Concurrent trades
//!   on one account serialize; trades on different accounts never contend.
//!
//! ## Public API
//!
//! - `TradeExecutor`: the transactional execute-one-trade entry point.
//! - `TradePlan`: the pure, pre-computed effect of a trade.
//! - `ExecutorError`: validation, business-rule, and storage failures.

// Declare the modules that constitute this crate.
pub mod error;
pub mod trade;

// Re-export the key components to provide a clean, public-facing API.
pub use error::ExecutorError;
pub use trade::{TradeExecutor, TradePlan};
