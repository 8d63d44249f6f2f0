use rust_decimal::Decimal;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Server,
    pub database: Database,
    pub simulation: Simulation,
}

/// Where the HTTP API binds.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// The interface to listen on (e.g., "0.0.0.0").
    pub host: String,
    pub port: u16,
}

/// Connection-pool sizing. The URL itself comes from the DATABASE_URL
/// environment variable, never from this file.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub max_connections: u32,
    /// How long a request may wait for a pooled connection before it is
    /// rejected as retryable instead of hanging.
    pub acquire_timeout_secs: u64,
}

/// Parameters for the market simulation background tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct Simulation {
    /// Seconds between price-drift passes over the stocks table.
    pub price_drift_interval_secs: u64,
    /// Seconds between portfolio previous-value snapshots.
    pub snapshot_interval_secs: u64,
    /// Symmetric bound for the per-tick random move. 0.01 corresponds to +/-1%.
    pub drift_pct: Decimal,
    /// Drifted prices are floored here so they can never reach zero.
    pub min_price: Decimal,
}
