use clap::{Parser, Subcommand};
use configuration::load_config;
use database::connection::{connect, run_migrations};
use simulator::{PortfolioSnapshotter, PriceFeed, PriceSimulator, RandomWalkFeed};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Cloudex brokerage backend.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (DATABASE_URL lives there).
    dotenvy::dotenv().ok();

    // Initialize tracing once, here. The library crates only emit events.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize the database connection pool and bring the schema up to date.
    let pool = connect(
        config.database.max_connections,
        Duration::from_secs(config.database.acquire_timeout_secs),
    )
    .await?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::Serve => serve(config, pool).await,
        Commands::DriftPrices => {
            let price_simulator = build_price_simulator(&config, pool);
            let updated = price_simulator.drift_once().await?;
            tracing::info!(updated, "Single price drift pass complete.");
            Ok(())
        }
        Commands::SnapshotPortfolios => {
            let snapshotter = PortfolioSnapshotter::new(pool);
            let updated = snapshotter.snapshot_once().await?;
            tracing::info!(updated, "Single portfolio snapshot pass complete.");
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A simulated brokerage backend: accounts, synthetic stocks, and trades.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API together with the price and snapshot schedulers.
    Serve,
    /// Run one price-drift pass over all stocks and exit.
    DriftPrices,
    /// Run one portfolio snapshot pass and exit.
    SnapshotPortfolios,
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

/// Starts the background schedulers and then runs the web server until shutdown.
async fn serve(config: configuration::Config, pool: sqlx::PgPool) -> anyhow::Result<()> {
    let price_simulator = build_price_simulator(&config, pool.clone());
    tokio::spawn(simulator::run_price_loop(
        price_simulator,
        Duration::from_secs(config.simulation.price_drift_interval_secs),
    ));

    let snapshotter = PortfolioSnapshotter::new(pool.clone());
    tokio::spawn(simulator::run_snapshot_loop(
        snapshotter,
        Duration::from_secs(config.simulation.snapshot_interval_secs),
    ));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    web_server::run_server(addr, pool).await
}

/// Wires the configured random-walk feed into a `PriceSimulator`.
fn build_price_simulator(config: &configuration::Config, pool: sqlx::PgPool) -> PriceSimulator {
    let feed: Arc<dyn PriceFeed> = Arc::new(RandomWalkFeed::new(
        config.simulation.drift_pct,
        config.simulation.min_price,
    ));
    PriceSimulator::new(pool, feed)
}
