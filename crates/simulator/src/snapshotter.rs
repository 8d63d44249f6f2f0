use crate::error::SimulatorError;
use sqlx::postgres::PgPool;

/// Periodically records each position's current total value so the
/// daily-change query can subtract it later.
///
/// The whole pass is a single bulk UPDATE: it runs independently of trade
/// execution and never takes the locks trades take.
#[derive(Debug, Clone)]
pub struct PortfolioSnapshotter {
    pool: PgPool,
}

impl PortfolioSnapshotter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Refreshes `previous_total_value` for every position and returns how
    /// many rows were touched.
    pub async fn snapshot_once(&self) -> Result<u64, SimulatorError> {
        let result = sqlx::query(
            r#"
            UPDATE positions AS p
            SET previous_total_value = p.total_shares * s.price
            FROM stocks AS s
            WHERE p.stock_id = s.stock_id
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
