use crate::{error::AppError, AppState};
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate, NaiveTime};
use core_types::{CoreError, TradeSide};
use database::{NewStock, NewUser};
use market_gate::MarketStatus;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// The original frontend relies on these exact parameter-missing messages.
fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing field: {field}.")))
}

fn require_param<T>(value: Option<T>, param: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing {param} parameter.")))
}

fn hash_password(plaintext: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

// ==============================================================================
// Stocks
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// # GET /stocks/search_bar
pub async fn search_stocks_bar_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let query = require_param(params.query, "query")?;
    let results = state.repo.search_stocks_bar(&query).await?;
    Ok(Json(json!(results)))
}

/// # GET /stocks/search
/// Ranked symbol search: exact match, then prefix, then substring.
pub async fn search_stocks_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let query = require_param(params.query, "query")?;
    let results = state.repo.search_stocks(&query).await?;
    Ok(Json(json!(results)))
}

/// # GET /stocks/all
pub async fn all_stocks(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let stocks = state.repo.get_stocks().await?;
    Ok(Json(json!({ "status": "success", "stocks": stocks })))
}

#[derive(Debug, Deserialize)]
pub struct StockIdQuery {
    pub stock_id: Option<i64>,
}

/// # GET /stocks/stock_by_id
pub async fn stock_by_id(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StockIdQuery>,
) -> Result<Json<Value>, AppError> {
    let stock_id = require_param(params.stock_id, "stock_id")?;
    let stock = state
        .repo
        .get_stock_by_id(stock_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "stock": stock })))
}

#[derive(Debug, Deserialize)]
pub struct SymbolQuery {
    pub symbol: Option<String>,
}

/// # GET /stocks/stock_id
pub async fn stock_id_by_symbol(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SymbolQuery>,
) -> Result<Json<Value>, AppError> {
    let symbol = require_param(params.symbol, "symbol")?;
    let stock_id = state
        .repo
        .get_stock_id_by_symbol(&symbol)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "stock_id": stock_id })))
}

#[derive(Debug, Deserialize)]
pub struct CreateStockRequest {
    pub company_name: Option<String>,
    pub symbol: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    #[serde(default)]
    pub image_data: String,
}

/// # POST /stocks/create_stock
pub async fn create_stock_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateStockRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let stock = NewStock {
        company_name: require(payload.company_name, "company_name")?,
        symbol: require(payload.symbol, "symbol")?,
        price: require(payload.price, "price")?,
        description: require(payload.description, "description")?,
        image_data: payload.image_data,
    };
    if stock.price <= Decimal::ZERO {
        return Err(AppError::Validation("Price must be greater than zero.".to_string()));
    }

    let stock_id = state.repo.create_stock(&stock).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "success", "stock_id": stock_id })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct DeleteStockRequest {
    pub stock_id: Option<i64>,
}

/// # DELETE /stocks/delete_stock
pub async fn delete_stock_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DeleteStockRequest>,
) -> Result<Json<Value>, AppError> {
    let stock_id = payload
        .stock_id
        .ok_or_else(|| AppError::Validation("Missing 'stock_id' in request body.".to_string()))?;

    match state.repo.delete_stock(stock_id).await {
        Err(database::DbError::NotFound) => {
            Err(AppError::NotFound(format!("Stock ID {stock_id} not found.")))
        }
        other => {
            other?;
            Ok(Json(json!({
                "status": "success",
                "message": format!("Stock {stock_id} deleted successfully.")
            })))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EditStockRequest {
    pub stock_id: Option<i64>,
    pub company_name: Option<String>,
    pub description: Option<String>,
}

/// # PUT /stocks/edit
pub async fn edit_stock(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EditStockRequest>,
) -> Result<Json<Value>, AppError> {
    let stock_id = payload
        .stock_id
        .ok_or_else(|| AppError::Validation("Missing stock_id in request.".to_string()))?;
    let company_name = require(payload.company_name, "company_name")?;
    let description = require(payload.description, "description")?;

    let was_updated = state
        .repo
        .update_stock(stock_id, &company_name, &description)
        .await?;
    if !was_updated {
        return Err(AppError::NotFound(format!("Stock with ID {stock_id} not found.")));
    }

    Ok(Json(json!({
        "status": "success",
        "message": format!("Stock {stock_id} updated successfully.")
    })))
}

/// # GET /stocks/top_gainers
pub async fn top_gainers(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let gainers = state.repo.get_top_gainers().await?;
    Ok(Json(json!({ "status": "success", "top_gainers": gainers })))
}

/// # GET /stocks/top_losers
pub async fn top_losers(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let losers = state.repo.get_top_losers().await?;
    Ok(Json(json!({ "status": "success", "top_losers": losers })))
}

#[derive(Debug, Deserialize)]
pub struct BuySellRequest {
    pub user_id: Option<i64>,
    pub stock_id: Option<i64>,
    pub shares: Option<Decimal>,
    pub transaction_type: Option<String>,
    pub fee_amount: Option<Decimal>,
}

/// # POST /stocks/buy_sell
///
/// The only mutating trade path: the request passes the market gate first,
/// then the trade executor applies it atomically.
pub async fn buy_sell_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BuySellRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user_id = require(payload.user_id, "user_id")?;
    let stock_id = require(payload.stock_id, "stock_id")?;
    let shares = require(payload.shares, "shares")?;
    let transaction_type = require(payload.transaction_type, "transaction_type")?;
    let fee_amount = require(payload.fee_amount, "fee_amount")?;

    let now = Local::now().naive_local();
    match state.gate.status_at(now).await? {
        MarketStatus::Open => {}
        MarketStatus::Closed => {
            return Err(AppError::MarketClosed("Market is currently closed.".to_string()));
        }
        MarketStatus::Holiday => {
            return Err(AppError::MarketClosed(
                "Market is closed today due to a holiday.".to_string(),
            ));
        }
    }

    let transaction_id = state
        .executor
        .execute_trade(user_id, stock_id, shares, &transaction_type, fee_amount)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Transaction completed successfully.",
            "transaction_id": transaction_id
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SharesQuery {
    pub user_id: Option<i64>,
    pub stock_id: Option<i64>,
}

/// # GET /stocks/get_shares
pub async fn get_shares_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SharesQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let stock_id = require_param(params.stock_id, "stock_id")?;
    let shares_owned = state.repo.get_shares(user_id, stock_id).await?;
    Ok(Json(json!({ "status": "success", "shares_owned": shares_owned })))
}

#[derive(Debug, Deserialize)]
pub struct WatchlistRequest {
    pub user_id: Option<i64>,
    pub stock_id: Option<i64>,
}

/// # POST /stocks/add_wishlist
pub async fn add_to_wishlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WatchlistRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = require(payload.user_id, "user_id")?;
    let stock_id = require(payload.stock_id, "stock_id")?;
    state.repo.add_to_watchlist(user_id, stock_id).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Stock added to watchlist successfully."
    })))
}

/// # POST /stocks/remove_wishlist
pub async fn remove_from_wishlist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WatchlistRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = require(payload.user_id, "user_id")?;
    let stock_id = require(payload.stock_id, "stock_id")?;

    match state.repo.remove_from_watchlist(user_id, stock_id).await {
        Err(database::DbError::NotFound) => Err(AppError::NotFound(format!(
            "Stock ID '{stock_id}' not found in watchlist for User ID '{user_id}'."
        ))),
        other => {
            other?;
            Ok(Json(json!({
                "status": "success",
                "message": "Stock removed from watchlist successfully."
            })))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<i64>,
}

/// # GET /stocks/get_wishlist
pub async fn get_wishlist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let watchlist = state.repo.get_user_watchlist(user_id).await?;
    Ok(Json(json!({ "status": "success", "watchlist": watchlist })))
}

// ==============================================================================
// Auth
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Field name kept for the frontend contract; it carries the plaintext
    /// password, which is hashed server-side before it touches storage.
    pub password_hash: Option<String>,
    pub user_role_id: Option<i16>,
}

/// # POST /auth/register
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (Some(username), Some(email), Some(plaintext)) =
        (payload.username, payload.email, payload.password_hash)
    else {
        return Err(AppError::Validation("Missing required fields.".to_string()));
    };

    let user = NewUser {
        username,
        email,
        password_hash: hash_password(&plaintext)?,
        user_role_id: payload.user_role_id.unwrap_or(0),
    };
    let user_id = state.repo.create_user(&user).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "User registered successfully.",
            "user_id": user_id
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// # POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let plaintext = payload
        .password_hash
        .ok_or_else(|| AppError::Validation("Missing password.".to_string()))?;
    if payload.username.is_none() && payload.email.is_none() {
        return Err(AppError::Validation(
            "Missing username or email identifier.".to_string(),
        ));
    }
    let username = payload.username.unwrap_or_default();
    let email = payload.email.unwrap_or_default();

    let Some(record) = state.repo.get_user_credentials(&email, &username).await? else {
        return Err(AppError::Unauthorized("Invalid login credentials.".to_string()));
    };
    if !verify_password(&plaintext, &record.password_hash) {
        return Err(AppError::Unauthorized("Invalid login credentials.".to_string()));
    }

    state.repo.mark_logged_in(record.user_id).await?;

    Ok(Json(json!({
        "status": "success",
        "user": {
            "user_id": record.user_id,
            "username": record.username,
            "email": record.email,
        }
    })))
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub user_id: Option<i64>,
}

/// # POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LogoutRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = payload
        .user_id
        .ok_or_else(|| AppError::Validation("Missing user_id.".to_string()))?;
    state.repo.mark_logged_out(user_id).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "User logged out successfully."
    })))
}

/// # GET /auth/get_role
pub async fn get_role(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let role_name = state
        .repo
        .get_user_role(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "role_name": role_name })))
}

#[derive(Debug, Deserialize)]
pub struct UserLookupQuery {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// # GET /auth/user_id
pub async fn fetch_user_id(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserLookupQuery>,
) -> Result<Json<Value>, AppError> {
    let username = require_param(params.username, "username")?;
    let email = require_param(params.email, "email")?;
    let user_id = state
        .repo
        .get_user_id(&email, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "user_id": user_id })))
}

/// # GET /auth/check_login_status
pub async fn check_login_status_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let is_logged_in = state.repo.check_login_status(user_id).await?;
    Ok(Json(json!({ "status": "success", "is_logged_in": is_logged_in })))
}

// ==============================================================================
// User
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    pub user_id: Option<i64>,
}

/// # DELETE /user/delete_user
pub async fn delete_user_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DeleteUserRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = payload
        .user_id
        .ok_or_else(|| AppError::Validation("Missing user_id.".to_string()))?;

    match state.repo.delete_user(user_id).await {
        Err(database::DbError::NotFound) => {
            Err(AppError::NotFound("User not found.".to_string()))
        }
        other => {
            other?;
            Ok(Json(json!({
                "status": "success",
                "message": "User deleted successfully."
            })))
        }
    }
}

/// # GET /user/user_stocks
pub async fn user_stocks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let stocks = state.repo.get_user_holdings(user_id).await?;
    Ok(Json(json!({ "status": "success", "stocks": stocks })))
}

/// # GET /user/user_watchlist
pub async fn user_watchlist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let watchlist = state.repo.get_user_watchlist(user_id).await?;
    Ok(Json(json!({ "status": "success", "watchlist": watchlist })))
}

/// # GET /user/user_profile
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let user = state
        .repo
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "user": user })))
}

#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Optional new plaintext password, hashed server-side when present.
    pub password_hash: Option<String>,
}

/// # PUT /user/edit_profile
pub async fn edit_profile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EditProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = require(payload.user_id, "user_id")?;
    let username = require(payload.username, "username")?;
    let email = require(payload.email, "email")?;

    let new_hash = match payload.password_hash.filter(|p| !p.is_empty()) {
        Some(plaintext) => Some(hash_password(&plaintext)?),
        None => None,
    };
    state
        .repo
        .edit_user(user_id, &email, &username, new_hash.as_deref())
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "User profile updated successfully."
    })))
}

/// # GET /user/transactions
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let transactions = state.repo.get_user_transactions(user_id).await?;
    Ok(Json(json!({ "status": "success", "transactions": transactions })))
}

#[derive(Debug, Deserialize)]
pub struct AddTransactionRequest {
    pub user_id: Option<i64>,
    pub stock_id: Option<i64>,
    pub transaction_type: Option<String>,
    pub shares: Option<Decimal>,
    pub price_per_share: Option<Decimal>,
    pub fee_amount: Option<Decimal>,
}

/// # POST /user/add_transaction
/// Manual history append for administrative corrections. `executed_at` is
/// always server-assigned.
pub async fn add_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddTransactionRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = require(payload.user_id, "user_id")?;
    let stock_id = require(payload.stock_id, "stock_id")?;
    let transaction_type = require(payload.transaction_type, "transaction_type")?;
    let shares = require(payload.shares, "shares")?;
    let price_per_share = require(payload.price_per_share, "price_per_share")?;
    let fee_amount = require(payload.fee_amount, "fee_amount")?;

    let side: TradeSide = transaction_type
        .parse()
        .map_err(|e: CoreError| AppError::Validation(e.to_string()))?;
    if shares <= Decimal::ZERO {
        return Err(AppError::Validation("Shares must be greater than zero.".to_string()));
    }
    if price_per_share <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Price per share must be greater than zero.".to_string(),
        ));
    }
    if fee_amount < Decimal::ZERO {
        return Err(AppError::Validation("Fee amount cannot be negative.".to_string()));
    }

    state
        .repo
        .add_transaction(user_id, stock_id, side, shares, price_per_share, fee_amount)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Transaction added successfully."
    })))
}

/// # GET /user/get_portfolio
pub async fn get_portfolio_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let portfolio = state.repo.get_portfolio(user_id).await?;
    Ok(Json(json!({ "status": "success", "portfolio": portfolio })))
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// # GET /user/get_user_id
pub async fn get_user_id_by_email(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EmailQuery>,
) -> Result<Json<Value>, AppError> {
    let email = require_param(params.email, "email")?;
    let user_id = state
        .repo
        .get_user_id_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "user_id": user_id })))
}

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// # GET /user/get_user_by_username
pub async fn get_user_by_username_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<Value>, AppError> {
    let username = require_param(params.username, "username")?;
    let user_id = state
        .repo
        .get_user_id_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "user_id": user_id })))
}

/// # GET /user/get_user_balance
pub async fn get_user_balance_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let balance = state
        .repo
        .get_user_balance(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(Json(json!({ "status": "success", "balance": balance })))
}

#[derive(Debug, Deserialize)]
pub struct FundsRequest {
    pub user_id: Option<i64>,
    pub amount: Option<Decimal>,
}

/// # POST /user/add_funds
pub async fn add_funds_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FundsRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = require(payload.user_id, "user_id")?;
    let amount = require(payload.amount, "amount")?;
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation("Amount must be greater than zero.".to_string()));
    }

    let new_balance = state.repo.add_funds(user_id, amount).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Funds added successfully.",
        "new_balance": new_balance
    })))
}

/// # POST /user/withdraw_funds
/// The debit is guarded in the database, so the balance can never go negative.
pub async fn withdraw_funds_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FundsRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = require(payload.user_id, "user_id")?;
    let amount = require(payload.amount, "amount")?;
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation("Amount must be greater than zero.".to_string()));
    }

    state.repo.withdraw_funds(user_id, amount).await?;
    Ok(Json(json!({
        "status": "success",
        "message": "Funds withdrawn successfully."
    })))
}

/// # GET /user/daily_portfolio_change
pub async fn daily_portfolio_change_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let daily_change = state.repo.get_daily_portfolio_change(user_id).await?;
    Ok(Json(json!({
        "status": "success",
        "daily_portfolio_change": daily_change
    })))
}

/// # GET /user/full_wishlist
pub async fn full_watchlist_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_param(params.user_id, "user_id")?;
    let watchlist = state.repo.get_full_watchlist(user_id).await?;
    Ok(Json(json!({ "status": "success", "watchlist": watchlist })))
}

// ==============================================================================
// Market hours & holidays (admin)
// ==============================================================================

/// # GET /api/market_hours
pub async fn get_hours(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let hours = state
        .repo
        .get_market_hours()
        .await?
        .ok_or(AppError::MarketHoursNotConfigured)?;
    Ok(Json(json!({
        "open_time": hours.open_time.format("%H:%M").to_string(),
        "close_time": hours.close_time.format("%H:%M").to_string(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateHoursRequest {
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

/// # PUT /api/market_hours
pub async fn update_hours(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateHoursRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(open_time), Some(close_time)) = (payload.open_time, payload.close_time) else {
        return Err(AppError::Validation(
            "open_time and close_time are required in HH:MM format.".to_string(),
        ));
    };

    let parse = |s: &str| {
        NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| {
            AppError::Validation("Time must be in HH:MM format, for example '09:30'.".to_string())
        })
    };
    state
        .repo
        .set_market_hours(parse(&open_time)?, parse(&close_time)?)
        .await?;

    Ok(Json(json!({ "status": "success" })))
}

/// # GET /api/holidays
pub async fn list_holidays(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let holidays = state.repo.list_holidays().await?;
    Ok(Json(json!(holidays)))
}

#[derive(Debug, Deserialize)]
pub struct CreateHolidayRequest {
    pub date: Option<String>,
    pub name: Option<String>,
}

/// # POST /api/holidays
pub async fn create_holiday(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateHolidayRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (Some(date), Some(name)) = (payload.date, payload.name) else {
        return Err(AppError::Validation("date and name are required".to_string()));
    };
    let holiday_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Date must be in YYYY-MM-DD format.".to_string()))?;

    state.repo.add_holiday(holiday_date, &name).await?;
    Ok((StatusCode::CREATED, Json(json!({ "status": "success" }))))
}

/// # DELETE /api/holidays/:holiday_id
pub async fn remove_holiday(
    State(state): State<Arc<AppState>>,
    Path(holiday_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state.repo.delete_holiday(holiday_id).await?;
    Ok(Json(json!({ "status": "success" })))
}

// ==============================================================================
// Transaction history (reporting)
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// # GET /api/transactions/history
pub async fn transaction_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;

    let parse_date = |value: Option<String>| -> Result<Option<NaiveDate>, AppError> {
        value
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                    AppError::Validation("Dates must be in YYYY-MM-DD format.".to_string())
                })
            })
            .transpose()
    };
    let start_date = parse_date(params.start_date)?;
    let end_date = parse_date(params.end_date)?;

    let transactions = state
        .repo
        .get_transaction_history(user_id, start_date, end_date)
        .await?;
    Ok(Json(json!({ "status": "success", "transactions": transactions })))
}
