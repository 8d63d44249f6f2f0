use crate::error::SimulatorError;
use crate::feed::PriceFeed;
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use std::sync::Arc;

/// Walks every stock through the configured price feed on each tick.
///
/// The whole pass commits as one transaction, so `previous_price` always
/// holds the immediately preceding price for every row and a half-finished
/// drift pass is never observable.
#[derive(Clone)]
pub struct PriceSimulator {
    pool: PgPool,
    feed: Arc<dyn PriceFeed>,
}

impl PriceSimulator {
    pub fn new(pool: PgPool, feed: Arc<dyn PriceFeed>) -> Self {
        Self { pool, feed }
    }

    /// Runs one drift pass over all stocks and returns how many rows moved.
    pub async fn drift_once(&self) -> Result<u64, SimulatorError> {
        let stocks = sqlx::query_as::<_, (i64, String, Decimal)>(
            "SELECT stock_id, symbol, price FROM stocks",
        )
        .fetch_all(&self.pool)
        .await?;

        if stocks.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut updated = 0u64;

        for (stock_id, symbol, old_price) in stocks {
            let new_price = self.feed.next_price(&symbol, old_price).await?;
            let result = sqlx::query(
                r#"
                UPDATE stocks
                SET previous_price = price,
                    price = $1
                WHERE stock_id = $2
                "#,
            )
            .bind(new_price)
            .bind(stock_id)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }
}
