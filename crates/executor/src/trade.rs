use crate::error::ExecutorError;
use core_types::TradeSide;
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;

/// The fully computed effect of a trade, produced before anything is written.
///
/// `compute` is deliberately side-effect free: it is the arithmetic of the
/// trade (cash delta, share delta, weighted-average cost) plus every
/// business-rule check, so the numeric invariants can be tested without a
/// database. `TradeExecutor::execute_trade` is then only responsible for
/// wrapping a computed plan in the right locking transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePlan {
    pub side: TradeSide,
    /// shares_requested × price_per_share, before the fee.
    pub amount: Decimal,
    pub new_balance: Decimal,
    pub new_total_shares: Decimal,
    pub new_average_cost: Decimal,
}

impl TradePlan {
    /// Validates a trade against the current account state and computes the
    /// state it would leave behind. Fails without side effects.
    pub fn compute(
        side: TradeSide,
        current_balance: Decimal,
        current_shares: Decimal,
        current_average_cost: Decimal,
        shares_requested: Decimal,
        price_per_share: Decimal,
        fee_amount: Decimal,
    ) -> Result<Self, ExecutorError> {
        // A zero-share trade is a financial no-op that would still pollute the
        // transaction history, so it is rejected up front.
        if shares_requested <= Decimal::ZERO {
            return Err(ExecutorError::Validation(
                "Shares must be greater than zero.".to_string(),
            ));
        }
        if fee_amount < Decimal::ZERO {
            return Err(ExecutorError::Validation(
                "Fee amount cannot be negative.".to_string(),
            ));
        }
        if price_per_share <= Decimal::ZERO {
            return Err(ExecutorError::Validation(
                "Invalid stock price provided for transaction.".to_string(),
            ));
        }

        let amount = shares_requested * price_per_share;
        let (net_cash_change, shares_delta) = match side {
            TradeSide::Buy => (-(amount + fee_amount), shares_requested),
            TradeSide::Sell => (amount - fee_amount, -shares_requested),
        };

        let new_balance = current_balance + net_cash_change;
        if new_balance < Decimal::ZERO {
            return match side {
                TradeSide::Buy => Err(ExecutorError::InsufficientFunds {
                    available: current_balance,
                    required: amount + fee_amount,
                }),
                // Only reachable when the fee exceeds the proceeds plus the
                // remaining balance; the balance >= 0 invariant still holds.
                TradeSide::Sell => Err(ExecutorError::Validation(
                    "Fee amount exceeds the sale proceeds and available balance.".to_string(),
                )),
            };
        }

        let new_total_shares = current_shares + shares_delta;
        if new_total_shares < Decimal::ZERO {
            return Err(ExecutorError::InsufficientShares {
                available: current_shares,
                requested: shares_requested,
            });
        }

        // Weighted-average cost basis. A buy from flat treats the prior average
        // as zero; a sell leaves the average untouched until the position is
        // fully closed, at which point it resets to exactly zero.
        let new_average_cost = match side {
            TradeSide::Buy => {
                ((current_shares * current_average_cost) + (shares_requested * price_per_share))
                    / new_total_shares
            }
            TradeSide::Sell if new_total_shares.is_zero() => Decimal::ZERO,
            TradeSide::Sell => current_average_cost,
        };

        Ok(TradePlan {
            side,
            amount,
            new_balance,
            new_total_shares,
            new_average_cost,
        })
    }
}

/// Executes buy/sell trades against the simulated market.
///
/// This is the only component with multi-row atomicity requirements, so it
/// owns its own transaction instead of going through `DbRepository`: the
/// account's balance row is read under `FOR UPDATE` and stays locked until
/// commit, which serializes concurrent trades on the same account while
/// leaving other accounts uncontended.
#[derive(Debug, Clone)]
pub struct TradeExecutor {
    pool: PgPool,
}

impl TradeExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically validates and applies one trade, returning the id of the
    /// recorded transaction.
    ///
    /// The side string is accepted case-insensitively and normalized. Every
    /// failure after the balance lock rolls the whole transaction back; a
    /// rejected trade leaves balance, position, and history untouched.
    pub async fn execute_trade(
        &self,
        user_id: i64,
        stock_id: i64,
        shares_requested: Decimal,
        side: &str,
        fee_amount: Decimal,
    ) -> Result<i64, ExecutorError> {
        let side: TradeSide = side.parse()?;

        let mut tx = self.pool.begin().await?;

        // The price used is whatever is current at this read; the drift
        // simulator's bulk updates race benignly with it.
        let price_per_share =
            sqlx::query_scalar::<_, Decimal>("SELECT price FROM stocks WHERE stock_id = $1")
                .bind(stock_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(ExecutorError::StockNotFound(stock_id))?;

        // Row-level exclusive lock on the balance. Held through commit so two
        // concurrent trades on one account can never interleave their reads
        // and writes of balance or position state.
        let current_balance =
            sqlx::query_scalar::<_, Decimal>("SELECT balance FROM users WHERE user_id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(ExecutorError::UserNotFound(user_id))?;

        let position = sqlx::query_as::<_, (Decimal, Decimal)>(
            "SELECT total_shares, average_cost FROM positions WHERE user_id = $1 AND stock_id = $2",
        )
        .bind(user_id)
        .bind(stock_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (current_shares, current_average_cost) =
            position.unwrap_or((Decimal::ZERO, Decimal::ZERO));

        let plan = TradePlan::compute(
            side,
            current_balance,
            current_shares,
            current_average_cost,
            shares_requested,
            price_per_share,
            fee_amount,
        )?;

        sqlx::query("UPDATE users SET balance = $1 WHERE user_id = $2")
            .bind(plan.new_balance)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        // Single conditional insert-or-update: no separate read-then-write
        // window on the position row. `previous_total_value` is left alone;
        // only the snapshotter refreshes it.
        sqlx::query(
            r#"
            INSERT INTO positions (user_id, stock_id, total_shares, average_cost, previous_total_value)
            VALUES ($1, $2, $3, $4, 0)
            ON CONFLICT (user_id, stock_id) DO UPDATE
            SET total_shares = EXCLUDED.total_shares,
                average_cost = EXCLUDED.average_cost
            "#,
        )
        .bind(user_id)
        .bind(stock_id)
        .bind(plan.new_total_shares)
        .bind(plan.new_average_cost)
        .execute(&mut *tx)
        .await?;

        let transaction_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO transaction_history
                (user_id, stock_id, shares, price_per_share, transaction_type, fee_amount, executed_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            RETURNING transaction_id
            "#,
        )
        .bind(user_id)
        .bind(stock_id)
        .bind(shares_requested)
        .bind(price_per_share)
        .bind(side.as_str())
        .bind(fee_amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            stock_id,
            transaction_id,
            side = side.as_str(),
            %shares_requested,
            %price_per_share,
            "Trade executed."
        );

        Ok(transaction_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn buy(
        balance: Decimal,
        shares_held: Decimal,
        avg_cost: Decimal,
        qty: Decimal,
        price: Decimal,
        fee: Decimal,
    ) -> Result<TradePlan, ExecutorError> {
        TradePlan::compute(TradeSide::Buy, balance, shares_held, avg_cost, qty, price, fee)
    }

    fn sell(
        balance: Decimal,
        shares_held: Decimal,
        avg_cost: Decimal,
        qty: Decimal,
        price: Decimal,
        fee: Decimal,
    ) -> Result<TradePlan, ExecutorError> {
        TradePlan::compute(TradeSide::Sell, balance, shares_held, avg_cost, qty, price, fee)
    }

    #[test]
    fn buy_debits_cost_plus_fee_exactly() {
        let plan = buy(dec!(1000.00), dec!(0), dec!(0), dec!(10), dec!(50.00), dec!(1.00)).unwrap();
        assert_eq!(plan.new_balance, dec!(499.00));
        assert_eq!(plan.new_total_shares, dec!(10));
        assert_eq!(plan.new_average_cost, dec!(50.00));
    }

    #[test]
    fn sell_credits_proceeds_minus_fee_exactly() {
        let plan = sell(dec!(499.00), dec!(10), dec!(50.00), dec!(10), dec!(60.00), dec!(1.00)).unwrap();
        assert_eq!(plan.new_balance, dec!(1098.00));
        assert_eq!(plan.new_total_shares, dec!(0));
        assert_eq!(plan.new_average_cost, dec!(0));
    }

    #[test]
    fn buy_then_full_sell_round_trip() {
        // Balance 1000.00, no position: buy 10 @ 50.00 (fee 1.10), then sell
        // all 10 @ 60.00 (fee 1.00).
        let after_buy = buy(dec!(1000.00), dec!(0), dec!(0), dec!(10), dec!(50.00), dec!(1.10)).unwrap();
        assert_eq!(after_buy.new_balance, dec!(498.90));
        assert_eq!(after_buy.new_total_shares, dec!(10));
        assert_eq!(after_buy.new_average_cost, dec!(50.00));

        let after_sell = sell(
            after_buy.new_balance,
            after_buy.new_total_shares,
            after_buy.new_average_cost,
            dec!(10),
            dec!(60.00),
            dec!(1.00),
        )
        .unwrap();
        assert_eq!(after_sell.new_balance, dec!(1097.90));
        assert_eq!(after_sell.new_total_shares, dec!(0));
        assert_eq!(after_sell.new_average_cost, dec!(0));
    }

    #[test]
    fn weighted_average_over_two_buys() {
        let first = buy(dec!(10000), dec!(0), dec!(0), dec!(3), dec!(10.50), dec!(0)).unwrap();
        let second = buy(
            first.new_balance,
            first.new_total_shares,
            first.new_average_cost,
            dec!(7),
            dec!(20.25),
            dec!(0),
        )
        .unwrap();
        // (3 * 10.50 + 7 * 20.25) / 10
        assert_eq!(second.new_average_cost, dec!(17.325));
        assert_eq!(second.new_total_shares, dec!(10));
    }

    #[test]
    fn buy_from_flat_treats_prior_average_as_zero() {
        // No division-by-zero, no NaN: the first buy's average is the price.
        let plan = buy(dec!(100), dec!(0), dec!(0), dec!(4), dec!(2.50), dec!(0)).unwrap();
        assert_eq!(plan.new_average_cost, dec!(2.50));
    }

    #[test]
    fn fee_never_affects_average_cost() {
        let cheap = buy(dec!(1000), dec!(0), dec!(0), dec!(10), dec!(50), dec!(0)).unwrap();
        let pricey = buy(dec!(1000), dec!(0), dec!(0), dec!(10), dec!(50), dec!(25)).unwrap();
        assert_eq!(cheap.new_average_cost, pricey.new_average_cost);
        assert_eq!(cheap.new_total_shares, pricey.new_total_shares);
    }

    #[test]
    fn partial_sell_keeps_average_cost() {
        let plan = sell(dec!(0), dec!(10), dec!(42.42), dec!(4), dec!(60), dec!(0)).unwrap();
        assert_eq!(plan.new_total_shares, dec!(6));
        assert_eq!(plan.new_average_cost, dec!(42.42));
    }

    #[test]
    fn full_sell_of_fractional_position_reaches_exact_zero() {
        let after_buy = buy(dec!(100), dec!(0), dec!(0), dec!(0.3), dec!(10), dec!(0)).unwrap();
        let after_sell = sell(
            after_buy.new_balance,
            after_buy.new_total_shares,
            after_buy.new_average_cost,
            dec!(0.3),
            dec!(11),
            dec!(0),
        )
        .unwrap();
        assert!(after_sell.new_total_shares.is_zero());
        assert_eq!(after_sell.new_average_cost, Decimal::ZERO);
    }

    #[test]
    fn buy_exactly_draining_the_balance_succeeds() {
        let plan = buy(dec!(501.00), dec!(0), dec!(0), dec!(10), dec!(50.00), dec!(1.00)).unwrap();
        assert_eq!(plan.new_balance, dec!(0));
    }

    #[test]
    fn buy_beyond_balance_is_rejected_with_context() {
        let err = buy(dec!(500.00), dec!(0), dec!(0), dec!(10), dec!(50.00), dec!(1.00)).unwrap_err();
        match err {
            ExecutorError::InsufficientFunds { available, required } => {
                assert_eq!(available, dec!(500.00));
                assert_eq!(required, dec!(501.00));
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn selling_more_than_held_is_rejected() {
        let err = sell(dec!(0), dec!(10), dec!(50), dec!(10.0001), dec!(60), dec!(0)).unwrap_err();
        match err {
            ExecutorError::InsufficientShares { available, requested } => {
                assert_eq!(available, dec!(10));
                assert_eq!(requested, dec!(10.0001));
            }
            other => panic!("expected InsufficientShares, got {other:?}"),
        }
    }

    #[test]
    fn zero_share_trade_is_rejected() {
        assert!(matches!(
            buy(dec!(1000), dec!(0), dec!(0), dec!(0), dec!(50), dec!(0)),
            Err(ExecutorError::Validation(_))
        ));
        assert!(matches!(
            sell(dec!(1000), dec!(10), dec!(50), dec!(-1), dec!(50), dec!(0)),
            Err(ExecutorError::Validation(_))
        ));
    }

    #[test]
    fn negative_fee_and_nonpositive_price_are_rejected() {
        assert!(matches!(
            buy(dec!(1000), dec!(0), dec!(0), dec!(1), dec!(50), dec!(-0.01)),
            Err(ExecutorError::Validation(_))
        ));
        assert!(matches!(
            buy(dec!(1000), dec!(0), dec!(0), dec!(1), dec!(0), dec!(0)),
            Err(ExecutorError::Validation(_))
        ));
    }

    #[test]
    fn sell_fee_exceeding_proceeds_and_balance_is_rejected() {
        // Proceeds 10, balance 2, fee 20: committing would overdraw the account.
        assert!(matches!(
            sell(dec!(2), dec!(1), dec!(10), dec!(1), dec!(10), dec!(20)),
            Err(ExecutorError::Validation(_))
        ));
    }

    #[test]
    fn rejected_plans_compute_no_state() {
        // The plan either comes back whole or not at all; a rejection carries
        // no partial numbers a caller could accidentally apply.
        let result = buy(dec!(1), dec!(0), dec!(0), dec!(10), dec!(50), dec!(0));
        assert!(result.is_err());
    }
}
