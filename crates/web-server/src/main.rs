use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves the HTTP API alone, without the background simulators; the full
// service is the root `cloudex serve` binary.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let pool = database::connect(10, Duration::from_secs(5)).await?;
    database::run_migrations(&pool).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    web_server::run_server(addr, pool).await
}
