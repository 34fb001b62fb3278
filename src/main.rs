//! sensorhub — environmental telemetry aggregation service.
//!
//! Subscribes to a sensor node's MQTT feed, keeps a bounded sliding window
//! of recent readings seeded from InfluxDB history, and publishes derived
//! snapshots to consumers.
//!
//! Run with:  `RUST_LOG=info sensorhub`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("sensorhub v{} starting", env!("CARGO_PKG_VERSION"));

    let config = hub_config::from_env()?;
    hub_runtime::run(config).await.map_err(Into::into)
}
