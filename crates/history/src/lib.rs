//! Cold-start history bootstrap for `sensorhub`.
//!
//! Issues one bounded Flux query against InfluxDB 2.x and converts the
//! annotated-CSV result into chronological samples ready for
//! [`hub_core::SlidingWindow::seed`].  All-or-nothing: any failure leaves
//! the window untouched and is surfaced to the caller.

pub mod rows;

pub use rows::parse_history_csv;

use hub_config::{InfluxConfig, WindowConfig};
use hub_core::{HubError, Result, Sample};
use std::time::Duration;
use tracing::debug;

/// Measurement the sensor node writes its readings under.
const MEASUREMENT: &str = "environment";
/// Query timeout — bootstrap must never hang startup.
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// One-shot loader for recent persisted readings.
pub struct HistoryLoader {
    influx: InfluxConfig,
    history_hours: u32,
    history_limit: u32,
    client: reqwest::Client,
}

impl HistoryLoader {
    pub fn new(influx: InfluxConfig, window: &WindowConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(QUERY_TIMEOUT)
            .build()
            .map_err(|e| HubError::History(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            influx,
            history_hours: window.history_hours,
            history_limit: window.history_limit,
            client,
        })
    }

    /// Fetch the recent history, oldest first.
    ///
    /// The query is bounded both in range (`history_hours`) and row count
    /// (`history_limit`), sorted newest-first so the limit keeps the most
    /// recent rows; the result is reversed into chronological order to
    /// match the window's insertion convention.
    pub async fn load_recent(&self) -> Result<Vec<Sample>> {
        let query = self.flux_query();
        debug!("History bootstrap query:\n{query}");

        let response = self
            .client
            .post(format!("{}/api/v2/query", self.influx.url))
            .query(&[("org", self.influx.org.as_str())])
            .header("Authorization", format!("Token {}", self.influx.token))
            .header("Accept", "application/csv")
            .json(&serde_json::json!({ "query": query, "type": "flux" }))
            .send()
            .await
            .map_err(|e| HubError::History(format!("query request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HubError::History(format!(
                "query rejected ({status}): {}",
                body.trim()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HubError::History(format!("cannot read query response: {e}")))?;

        let mut samples = parse_history_csv(&body)?;
        samples.reverse(); // newest-first from the store → oldest-first for the window
        debug!("History bootstrap returned {} rows", samples.len());
        Ok(samples)
    }

    fn flux_query(&self) -> String {
        format!(
            r#"from(bucket: "{bucket}")
  |> range(start: -{hours}h)
  |> filter(fn: (r) => r._measurement == "{MEASUREMENT}")
  |> pivot(rowKey: ["_time"], columnKey: ["_field"], valueColumn: "_value")
  |> keep(columns: ["_time", "temperature", "humidity", "light_status", "light_value"])
  |> sort(columns: ["_time"], desc: true)
  |> limit(n: {limit})"#,
            bucket = self.influx.bucket,
            hours = self.history_hours,
            limit = self.history_limit,
        )
    }
}
