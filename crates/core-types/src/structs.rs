use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tradable synthetic instrument. `previous_price` holds the price before the
/// most recent drift tick and is the denominator for gain/loss percentages; a
/// freshly listed stock starts with it equal to the listing price.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Stock {
    pub stock_id: i64,
    pub symbol: String,
    pub company_name: String,
    pub description: String,
    pub price: Decimal,
    pub previous_price: Option<Decimal>,
    pub is_tradable: bool,
    pub image_data: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the top-gainers / top-losers ranking. `percentage_change` is the
/// signed move over `previous_price`, computed in SQL so the ordering and the
/// reported number cannot drift apart.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockMover {
    pub stock_id: i64,
    pub symbol: String,
    pub company_name: String,
    pub price: Decimal,
    pub previous_price: Decimal,
    pub percentage_change: Decimal,
}

/// A ranked symbol-search hit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SymbolMatch {
    pub stock_id: i64,
    pub symbol: String,
}

/// A search-bar hit over symbol and company name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockSummary {
    pub stock_id: i64,
    pub symbol: String,
    pub company_name: String,
}

/// The public face of an account. Never carries the credential.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

/// Internal row used by the login path. Holds the opaque password hash and is
/// deliberately not serializable.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// One position in a user's portfolio, as exposed by the portfolio listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioEntry {
    pub stock_id: i64,
    pub total_shares: Decimal,
    pub average_cost: Decimal,
}

/// A position joined with its stock's display data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Holding {
    pub symbol: String,
    pub company_name: String,
    pub total_shares: Decimal,
    pub average_cost: Decimal,
}

/// An immutable trade record joined with the stock it touched.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub stock_id: i64,
    pub transaction_type: String,
    pub shares: Decimal,
    pub price_per_share: Decimal,
    pub fee_amount: Decimal,
    pub executed_at: DateTime<Utc>,
    pub company_name: String,
    pub symbol: String,
}

/// A date-filtered history row for the reporting endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransactionHistoryItem {
    pub transaction_id: i64,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub symbol: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// A watchlist entry joined with its stock's current state.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchlistStock {
    pub stock_id: i64,
    pub symbol: String,
    pub company_name: String,
    pub price: Decimal,
}

/// The single configured trading window. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct MarketHours {
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

/// A configured non-trading day. Serializes the date under the `date` key the
/// admin frontend expects.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Holiday {
    pub id: i64,
    #[serde(rename = "date")]
    pub holiday_date: NaiveDate,
    pub name: String,
}
