//! Orchestration for `sensorhub`.
//!
//! Owns the hub loop and wires together all background work:
//! - MQTT ingest listener (live readings + connection lifecycle)
//! - InfluxDB history bootstrap (one-shot window seed)
//! - snapshot watch channel (consumers: UI, API, the status logger)

pub mod hub;

pub use hub::Hub;

use hub_config::HubConfig;
use hub_core::{ConnectionState, Result, Snapshot};
use hub_history::HistoryLoader;
use hub_ingest::StreamIngestor;
use tokio::sync::watch;
use tracing::{error, info};

/// Run the hub until the ingest channel closes or Ctrl-C arrives.
///
/// Ordering guarantee: the history bootstrap completes (or fails) before
/// any live event is applied.  The ingest listener is already running while
/// the query is in flight — early readings simply buffer in its channel —
/// so no live data is lost during bootstrap, and `seed` still strictly
/// precedes the first `append`.
pub async fn run(config: HubConfig) -> Result<()> {
    let mut hub = Hub::new(config.window.capacity);
    spawn_status_logger(hub.subscribe());

    let mut events = StreamIngestor::new(config.broker).spawn_listener();

    let loader = HistoryLoader::new(config.influx, &config.window)?;
    match loader.load_recent().await {
        Ok(samples) => hub.seed(samples),
        Err(e) => {
            // Non-fatal: continue on live data only, window stays empty.
            error!("History bootstrap failed: {e}");
        }
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => hub.apply(event),
                None => break, // ingest task gone
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    // Dropping the receiver stops the ingest task; publish the terminal
    // offline snapshot, after which no further notifications happen.
    drop(events);
    hub.finalize();
    Ok(())
}

/// Log connection transitions and reading progress from the snapshot
/// stream.  Doubles as the reference snapshot consumer.
fn spawn_status_logger(mut rx: watch::Receiver<Snapshot>) {
    tokio::spawn(async move {
        let mut last_connection: Option<ConnectionState> = None;
        while rx.changed().await.is_ok() {
            let (connection, count, len) = {
                let snapshot = rx.borrow_and_update();
                (
                    snapshot.connection,
                    snapshot.message_count,
                    snapshot.chart_data.len(),
                )
            };
            if last_connection != Some(connection) {
                info!("Channel {connection}; {count} readings so far, window={len}");
                last_connection = Some(connection);
            }
        }
    });
}
