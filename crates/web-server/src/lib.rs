use axum::{
    routing::{delete, get, post, put},
    Router,
};
use database::DbRepository;
use executor::TradeExecutor;
use market_gate::MarketGate;
use sqlx::postgres::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: DbRepository,
    pub gate: MarketGate,
    pub executor: TradeExecutor,
}

/// The main function to configure and run the web server.
///
/// The pool is created by the caller (the binary), which also runs migrations
/// and starts the background simulators before handing the pool over here.
pub async fn run_server(addr: SocketAddr, pool: PgPool) -> anyhow::Result<()> {
    let repo = DbRepository::new(pool.clone());
    let gate = MarketGate::new(repo.clone());
    let trade_executor = TradeExecutor::new(pool);

    let app_state = Arc::new(AppState {
        repo,
        gate,
        executor: trade_executor,
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    // The paths are a contract with the existing frontend and are preserved
    // verbatim, quirks included (e.g., the watchlist routes say "wishlist").
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Stocks
        .route("/stocks/all", get(handlers::all_stocks))
        .route("/stocks/stock_by_id", get(handlers::stock_by_id))
        .route("/stocks/stock_id", get(handlers::stock_id_by_symbol))
        .route("/stocks/create_stock", post(handlers::create_stock_route))
        .route("/stocks/delete_stock", delete(handlers::delete_stock_route))
        .route("/stocks/edit", put(handlers::edit_stock))
        .route("/stocks/buy_sell", post(handlers::buy_sell_route))
        .route("/stocks/search", get(handlers::search_stocks_route))
        .route("/stocks/search_bar", get(handlers::search_stocks_bar_route))
        .route("/stocks/get_shares", get(handlers::get_shares_route))
        .route("/stocks/top_gainers", get(handlers::top_gainers))
        .route("/stocks/top_losers", get(handlers::top_losers))
        .route("/stocks/add_wishlist", post(handlers::add_to_wishlist))
        .route("/stocks/remove_wishlist", post(handlers::remove_from_wishlist))
        .route("/stocks/get_wishlist", get(handlers::get_wishlist))
        // Auth
        .route("/auth/register", post(handlers::register_user))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/get_role", get(handlers::get_role))
        .route("/auth/user_id", get(handlers::fetch_user_id))
        .route("/auth/check_login_status", get(handlers::check_login_status_route))
        // User
        .route("/user/delete_user", delete(handlers::delete_user_route))
        .route("/user/user_stocks", get(handlers::user_stocks))
        .route("/user/user_watchlist", get(handlers::user_watchlist))
        .route("/user/user_profile", get(handlers::get_user_profile))
        .route("/user/edit_profile", put(handlers::edit_profile))
        .route("/user/transactions", get(handlers::get_transactions))
        .route("/user/add_transaction", post(handlers::add_transaction))
        .route("/user/get_portfolio", get(handlers::get_portfolio_route))
        .route("/user/get_user_id", get(handlers::get_user_id_by_email))
        .route("/user/get_user_by_username", get(handlers::get_user_by_username_route))
        .route("/user/get_user_balance", get(handlers::get_user_balance_route))
        .route("/user/add_funds", post(handlers::add_funds_route))
        .route("/user/withdraw_funds", post(handlers::withdraw_funds_route))
        .route("/user/daily_portfolio_change", get(handlers::daily_portfolio_change_route))
        .route("/user/full_wishlist", get(handlers::full_watchlist_route))
        // Market configuration (admin)
        .route("/api/market_hours", get(handlers::get_hours).put(handlers::update_hours))
        .route("/api/holidays", get(handlers::list_holidays).post(handlers::create_holiday))
        .route("/api/holidays/:holiday_id", delete(handlers::remove_holiday))
        // Reporting
        .route("/api/transactions/history", get(handlers::transaction_history))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
