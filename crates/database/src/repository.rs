use crate::DbError;
use chrono::{NaiveDate, NaiveTime};
use core_types::{
    Holding, Holiday, MarketHours, PortfolioEntry, Stock, StockMover, StockSummary, SymbolMatch,
    TradeSide, TransactionHistoryItem, TransactionRecord, UserCredentials, UserProfile,
    WatchlistStock,
};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all the plain read/listing/CRUD queries;
/// trade execution lives in the `executor` crate because it needs its own
/// locking transaction.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Everything needed to list a new stock. `previous_price` starts equal to the
/// listing price so the instrument ranks as unchanged until the first drift tick.
#[derive(Debug, Clone)]
pub struct NewStock {
    pub company_name: String,
    pub symbol: String,
    pub price: Decimal,
    pub description: String,
    pub image_data: String,
}

/// Everything needed to register an account. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub user_role_id: i16,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==========================================================================
    // Stocks
    // ==========================================================================

    /// Fetches every tradable stock.
    pub async fn get_stocks(&self) -> Result<Vec<Stock>, DbError> {
        let stocks = sqlx::query_as::<_, Stock>(
            r#"
            SELECT stock_id, symbol, company_name, description, price, previous_price,
                   is_tradable, image_data, created_at
            FROM stocks
            WHERE is_tradable = TRUE
            ORDER BY symbol ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stocks)
    }

    pub async fn get_stock_by_id(&self, stock_id: i64) -> Result<Option<Stock>, DbError> {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            SELECT stock_id, symbol, company_name, description, price, previous_price,
                   is_tradable, image_data, created_at
            FROM stocks
            WHERE stock_id = $1
            "#,
        )
        .bind(stock_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(stock)
    }

    pub async fn get_stock_id_by_symbol(&self, symbol: &str) -> Result<Option<i64>, DbError> {
        let stock_id = sqlx::query_scalar::<_, i64>("SELECT stock_id FROM stocks WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stock_id)
    }

    /// The current price of one stock, or `None` for an unknown id.
    pub async fn get_stock_price(&self, stock_id: i64) -> Result<Option<Decimal>, DbError> {
        let price = sqlx::query_scalar::<_, Decimal>("SELECT price FROM stocks WHERE stock_id = $1")
            .bind(stock_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(price)
    }

    /// Lists a new stock and returns its id. A duplicate symbol is a `Conflict`;
    /// any other storage failure propagates rather than being swallowed.
    pub async fn create_stock(&self, stock: &NewStock) -> Result<i64, DbError> {
        let stock_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO stocks (company_name, symbol, price, description, previous_price, image_data)
            VALUES ($1, $2, $3, $4, $3, $5)
            RETURNING stock_id
            "#,
        )
        .bind(&stock.company_name)
        .bind(&stock.symbol)
        .bind(stock.price)
        .bind(&stock.description)
        .bind(&stock.image_data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DbError::on_unique_violation(
                e,
                format!("The stock symbol '{}' already exists.", stock.symbol),
            )
        })?;
        Ok(stock_id)
    }

    /// Updates the editable display fields of a stock. Returns `false` if the
    /// id does not exist.
    pub async fn update_stock(
        &self,
        stock_id: i64,
        company_name: &str,
        description: &str,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE stocks
            SET company_name = $1,
                description = $2
            WHERE stock_id = $3
            "#,
        )
        .bind(company_name)
        .bind(description)
        .bind(stock_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a stock together with every row that references it, in an order
    /// that satisfies the foreign keys: transactions and watchlist entries
    /// first, then positions, then the stock itself, all in one transaction.
    pub async fn delete_stock(&self, stock_id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM transaction_history WHERE stock_id = $1")
            .bind(stock_id)
            .execute(&mut *tx)
            .await?;
        tracing::debug!(
            stock_id,
            rows = deleted.rows_affected(),
            "Deleted associated transaction records."
        );

        sqlx::query("DELETE FROM watchlist WHERE stock_id = $1")
            .bind(stock_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM positions WHERE stock_id = $1")
            .bind(stock_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM stocks WHERE stock_id = $1")
            .bind(stock_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    /// The (at most) three stocks with the largest positive percentage move
    /// over `previous_price`. Rows with a NULL or non-positive denominator are
    /// excluded entirely.
    pub async fn get_top_gainers(&self) -> Result<Vec<StockMover>, DbError> {
        let gainers = sqlx::query_as::<_, StockMover>(
            r#"
            SELECT stock_id, symbol, company_name, price, previous_price,
                   ((price - previous_price) / previous_price) * 100 AS percentage_change
            FROM stocks
            WHERE previous_price IS NOT NULL
              AND previous_price > 0
            ORDER BY percentage_change DESC
            LIMIT 3
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(gainers)
    }

    /// The (at most) three stocks with the most negative percentage move.
    pub async fn get_top_losers(&self) -> Result<Vec<StockMover>, DbError> {
        let losers = sqlx::query_as::<_, StockMover>(
            r#"
            SELECT stock_id, symbol, company_name, price, previous_price,
                   ((price - previous_price) / previous_price) * 100 AS percentage_change
            FROM stocks
            WHERE previous_price IS NOT NULL
              AND previous_price > 0
            ORDER BY percentage_change ASC
            LIMIT 3
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(losers)
    }

    /// Ranked symbol search: exact match first, then prefix, then substring.
    pub async fn search_stocks(&self, keyword: &str) -> Result<Vec<SymbolMatch>, DbError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let matches = sqlx::query_as::<_, SymbolMatch>(
            r#"
            SELECT stock_id, symbol
            FROM stocks
            WHERE symbol ILIKE $1
            ORDER BY
                CASE
                    WHEN symbol ILIKE $2 THEN 1
                    WHEN symbol ILIKE $3 THEN 2
                    ELSE 3
                END,
                symbol ASC
            LIMIT 3
            "#,
        )
        .bind(format!("%{keyword}%"))
        .bind(keyword)
        .bind(format!("{keyword}%"))
        .fetch_all(&self.pool)
        .await?;
        Ok(matches)
    }

    /// Search-bar lookup over symbol and company name, prefix or substring.
    pub async fn search_stocks_bar(&self, keyword: &str) -> Result<Vec<StockSummary>, DbError> {
        let results = sqlx::query_as::<_, StockSummary>(
            r#"
            SELECT stock_id, symbol, company_name
            FROM stocks
            WHERE symbol ILIKE $1 OR company_name ILIKE $1
               OR symbol ILIKE $2 OR company_name ILIKE $2
            ORDER BY symbol ASC
            LIMIT 5
            "#,
        )
        .bind(format!("{keyword}%"))
        .bind(format!("%{keyword}%"))
        .fetch_all(&self.pool)
        .await?;
        Ok(results)
    }

    // ==========================================================================
    // Accounts
    // ==========================================================================

    /// Registers an account and returns its id. A duplicate username or email
    /// is a `Conflict`.
    pub async fn create_user(&self, user: &NewUser) -> Result<i64, DbError> {
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, email, password_hash, is_logged_in, user_role_id)
            VALUES ($1, $2, $3, FALSE, $4)
            RETURNING user_id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.user_role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::on_unique_violation(e, "Username or Email already exists."))?;
        Ok(user_id)
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserProfile>, DbError> {
        let user = sqlx::query_as::<_, UserProfile>(
            "SELECT user_id, username, email FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Fetches the credential row matched by email OR username, for the login path.
    pub async fn get_user_credentials(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<UserCredentials>, DbError> {
        let record = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT user_id, username, email, password_hash
            FROM users
            WHERE email = $1 OR username = $2
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    /// Marks an account as logged in and stamps the login time.
    pub async fn mark_logged_in(&self, user_id: i64) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET is_logged_in = TRUE, last_login_at = now() WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn mark_logged_out(&self, user_id: i64) -> Result<(), DbError> {
        sqlx::query("UPDATE users SET is_logged_in = FALSE WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// The login flag for an account; an unknown id reads as logged out.
    pub async fn check_login_status(&self, user_id: i64) -> Result<bool, DbError> {
        let status = sqlx::query_scalar::<_, bool>("SELECT is_logged_in FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(status.unwrap_or(false))
    }

    pub async fn get_user_role(&self, user_id: i64) -> Result<Option<String>, DbError> {
        let role = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.role_name
            FROM users u
            JOIN roles r ON u.user_role_id = r.role_id
            WHERE u.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(role)
    }

    pub async fn get_user_id_by_email(&self, email: &str) -> Result<Option<i64>, DbError> {
        let user_id = sqlx::query_scalar::<_, i64>("SELECT user_id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user_id)
    }

    pub async fn get_user_id_by_username(&self, username: &str) -> Result<Option<i64>, DbError> {
        let user_id = sqlx::query_scalar::<_, i64>("SELECT user_id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user_id)
    }

    /// Id lookup requiring both identifiers to match the same row.
    pub async fn get_user_id(&self, email: &str, username: &str) -> Result<Option<i64>, DbError> {
        let user_id =
            sqlx::query_scalar::<_, i64>("SELECT user_id FROM users WHERE email = $1 AND username = $2")
                .bind(email)
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user_id)
    }

    /// Updates profile fields, optionally replacing the password hash.
    pub async fn edit_user(
        &self,
        user_id: i64,
        email: &str,
        username: &str,
        password_hash: Option<&str>,
    ) -> Result<(), DbError> {
        let result = match password_hash {
            Some(hash) => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET email = $1,
                        username = $2,
                        password_hash = $3
                    WHERE user_id = $4
                    "#,
                )
                .bind(email)
                .bind(username)
                .bind(hash)
                .bind(user_id)
                .execute(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET email = $1,
                        username = $2
                    WHERE user_id = $3
                    "#,
                )
                .bind(email)
                .bind(username)
                .bind(user_id)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(|e| DbError::on_unique_violation(e, "Username or Email already exists."))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    pub async fn get_user_balance(&self, user_id: i64) -> Result<Option<Decimal>, DbError> {
        let balance = sqlx::query_scalar::<_, Decimal>("SELECT balance FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(balance)
    }

    /// Credits an account and returns the new balance in the same statement.
    pub async fn add_funds(&self, user_id: i64, amount: Decimal) -> Result<Decimal, DbError> {
        let new_balance = sqlx::query_scalar::<_, Decimal>(
            "UPDATE users SET balance = balance + $1 WHERE user_id = $2 RETURNING balance",
        )
        .bind(amount)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(new_balance)
    }

    /// Debits an account only if the balance covers it. The guard lives in the
    /// statement itself so there is no read-then-write window.
    pub async fn withdraw_funds(&self, user_id: i64, amount: Decimal) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE users SET balance = balance - $1 WHERE user_id = $2 AND balance >= $1",
        )
        .bind(amount)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::InsufficientFunds);
        }
        Ok(())
    }

    /// Removes an account and everything it owns. Deletion order matters for
    /// the foreign keys: transaction and watchlist rows first, then positions,
    /// then the account row, all in one transaction.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM transaction_history WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM watchlist WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM positions WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    // ==========================================================================
    // Positions
    // ==========================================================================

    pub async fn get_portfolio(&self, user_id: i64) -> Result<Vec<PortfolioEntry>, DbError> {
        let portfolio = sqlx::query_as::<_, PortfolioEntry>(
            r#"
            SELECT stock_id, total_shares, average_cost
            FROM positions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(portfolio)
    }

    /// The number of shares a user owns of one stock; no row reads as zero.
    pub async fn get_shares(&self, user_id: i64, stock_id: i64) -> Result<Decimal, DbError> {
        let shares = sqlx::query_scalar::<_, Decimal>(
            "SELECT total_shares FROM positions WHERE user_id = $1 AND stock_id = $2",
        )
        .bind(user_id)
        .bind(stock_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(shares.unwrap_or(Decimal::ZERO))
    }

    /// A user's positions joined with the stock's display data.
    pub async fn get_user_holdings(&self, user_id: i64) -> Result<Vec<Holding>, DbError> {
        let holdings = sqlx::query_as::<_, Holding>(
            r#"
            SELECT s.symbol, s.company_name, p.total_shares, p.average_cost
            FROM positions p
            JOIN stocks s ON p.stock_id = s.stock_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(holdings)
    }

    /// Sum of (live value - snapshotted value) across the user's positions.
    /// An empty portfolio reads as zero change.
    pub async fn get_daily_portfolio_change(&self, user_id: i64) -> Result<Decimal, DbError> {
        let change = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM((p.total_shares * s.price) - p.previous_total_value), 0) AS daily_change
            FROM positions p
            JOIN stocks s ON p.stock_id = s.stock_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(change)
    }

    // ==========================================================================
    // Transactions
    // ==========================================================================

    /// The full trade history for a user, newest first, joined with the stock
    /// name and symbol.
    pub async fn get_user_transactions(&self, user_id: i64) -> Result<Vec<TransactionRecord>, DbError> {
        let transactions = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT th.transaction_id, th.stock_id, th.transaction_type, th.shares,
                   th.price_per_share, th.fee_amount, th.executed_at,
                   s.company_name, s.symbol
            FROM transaction_history th
            JOIN stocks s ON th.stock_id = s.stock_id
            WHERE th.user_id = $1
            ORDER BY th.executed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }

    /// Trade history filtered by an optional inclusive date window.
    pub async fn get_transaction_history(
        &self,
        user_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<TransactionHistoryItem>, DbError> {
        let history = sqlx::query_as::<_, TransactionHistoryItem>(
            r#"
            SELECT th.transaction_id, th.transaction_type, s.symbol,
                   th.shares AS quantity, th.price_per_share AS price,
                   th.executed_at AS "timestamp"
            FROM transaction_history th
            JOIN stocks s ON th.stock_id = s.stock_id
            WHERE th.user_id = $1
              AND ($2::date IS NULL OR th.executed_at >= $2::date)
              AND ($3::date IS NULL OR th.executed_at <= $3::date)
            ORDER BY th.executed_at DESC
            "#,
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(history)
    }

    /// Manually appends a transaction record. `executed_at` is always
    /// server-assigned; callers cannot backdate history.
    pub async fn add_transaction(
        &self,
        user_id: i64,
        stock_id: i64,
        side: TradeSide,
        shares: Decimal,
        price_per_share: Decimal,
        fee_amount: Decimal,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO transaction_history
                (user_id, stock_id, transaction_type, shares, price_per_share, fee_amount, executed_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            "#,
        )
        .bind(user_id)
        .bind(stock_id)
        .bind(side.as_str())
        .bind(shares)
        .bind(price_per_share)
        .bind(fee_amount)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ==========================================================================
    // Watchlist
    // ==========================================================================

    /// Adds a stock to a user's watchlist. Duplicates are a `Conflict`.
    pub async fn add_to_watchlist(&self, user_id: i64, stock_id: i64) -> Result<(), DbError> {
        sqlx::query("INSERT INTO watchlist (user_id, stock_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(stock_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DbError::on_unique_violation(
                    e,
                    format!(
                        "Stock ID '{stock_id}' is already in the watchlist for User ID '{user_id}'."
                    ),
                )
            })?;
        Ok(())
    }

    pub async fn remove_from_watchlist(&self, user_id: i64, stock_id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM watchlist WHERE user_id = $1 AND stock_id = $2")
            .bind(user_id)
            .bind(stock_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// The watched stock ids for a user.
    pub async fn get_user_watchlist(&self, user_id: i64) -> Result<Vec<i64>, DbError> {
        let watchlist = sqlx::query_scalar::<_, i64>("SELECT stock_id FROM watchlist WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(watchlist)
    }

    /// The watched stocks joined with their current display data and price.
    pub async fn get_full_watchlist(&self, user_id: i64) -> Result<Vec<WatchlistStock>, DbError> {
        let watchlist = sqlx::query_as::<_, WatchlistStock>(
            r#"
            SELECT s.stock_id, s.symbol, s.company_name, s.price
            FROM stocks s
            JOIN watchlist w ON s.stock_id = w.stock_id
            WHERE w.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(watchlist)
    }

    // ==========================================================================
    // Market calendar
    // ==========================================================================

    /// The configured trading window, or `None` when it was never configured.
    pub async fn get_market_hours(&self) -> Result<Option<MarketHours>, DbError> {
        let hours = sqlx::query_as::<_, MarketHours>(
            "SELECT open_time, close_time FROM market_hours LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(hours)
    }

    /// Sets the trading window, creating the single configuration row if it is
    /// missing.
    pub async fn set_market_hours(&self, open_time: NaiveTime, close_time: NaiveTime) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO market_hours (id, open_time, close_time)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE
            SET open_time = EXCLUDED.open_time,
                close_time = EXCLUDED.close_time
            "#,
        )
        .bind(open_time)
        .bind(close_time)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// True when the given date is a configured holiday.
    pub async fn is_holiday(&self, date: NaiveDate) -> Result<bool, DbError> {
        let hit = sqlx::query_scalar::<_, i32>("SELECT 1 FROM market_holidays WHERE holiday_date = $1")
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hit.is_some())
    }

    pub async fn list_holidays(&self) -> Result<Vec<Holiday>, DbError> {
        let holidays = sqlx::query_as::<_, Holiday>(
            "SELECT id, holiday_date, name FROM market_holidays ORDER BY holiday_date",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(holidays)
    }

    /// Adds a holiday; adding the same date twice is a harmless no-op.
    pub async fn add_holiday(&self, holiday_date: NaiveDate, name: &str) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO market_holidays (holiday_date, name)
            VALUES ($1, $2)
            ON CONFLICT (holiday_date) DO NOTHING
            "#,
        )
        .bind(holiday_date)
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_holiday(&self, holiday_id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM market_holidays WHERE id = $1")
            .bind(holiday_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
