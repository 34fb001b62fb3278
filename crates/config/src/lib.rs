pub mod schema;

pub use schema::{BrokerConfig, HubConfig, InfluxConfig, WindowConfig};

use hub_core::{HubError, Result};

/// Load configuration from the environment.  Every variable is optional —
/// unset ones fall back to the defaults in [`schema`] so the hub can always
/// start against a localhost broker.
///
/// Recognized variables:
/// - `SENSORHUB_MQTT_HOST`, `SENSORHUB_MQTT_PORT`, `SENSORHUB_MQTT_TOPIC`,
///   `SENSORHUB_MQTT_CLIENT_ID`
/// - `INFLUX_URL`, `INFLUX_TOKEN`, `INFLUX_ORG`, `INFLUX_BUCKET`
/// - `SENSORHUB_WINDOW_CAPACITY`, `SENSORHUB_HISTORY_HOURS`,
///   `SENSORHUB_HISTORY_LIMIT`
pub fn from_env() -> Result<HubConfig> {
    let mut config = HubConfig::default();

    if let Ok(host) = std::env::var("SENSORHUB_MQTT_HOST") {
        config.broker.host = host;
    }
    if let Some(port) = parse_var("SENSORHUB_MQTT_PORT")? {
        config.broker.port = port;
    }
    if let Ok(topic) = std::env::var("SENSORHUB_MQTT_TOPIC") {
        config.broker.topic = topic;
    }
    if let Ok(id) = std::env::var("SENSORHUB_MQTT_CLIENT_ID") {
        config.broker.client_id = id;
    }

    if let Ok(url) = std::env::var("INFLUX_URL") {
        config.influx.url = url;
    }
    if let Ok(token) = std::env::var("INFLUX_TOKEN") {
        config.influx.token = token;
    } else {
        tracing::warn!("INFLUX_TOKEN not set; history bootstrap will likely be rejected");
    }
    if let Ok(org) = std::env::var("INFLUX_ORG") {
        config.influx.org = org;
    }
    if let Ok(bucket) = std::env::var("INFLUX_BUCKET") {
        config.influx.bucket = bucket;
    }

    if let Some(capacity) = parse_var("SENSORHUB_WINDOW_CAPACITY")? {
        config.window.capacity = capacity;
    }
    if let Some(hours) = parse_var("SENSORHUB_HISTORY_HOURS")? {
        config.window.history_hours = hours;
    }
    if let Some(limit) = parse_var("SENSORHUB_HISTORY_LIMIT")? {
        config.window.history_limit = limit;
    }

    Ok(config)
}

/// Read and parse one numeric variable.  Unset is fine; unparseable is a
/// config error rather than a silent fallback.
fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| HubError::Config(format!("{name}: cannot parse '{raw}'"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = HubConfig::default();
        assert_eq!(config.broker.port, 1883);
        assert_eq!(config.broker.topic, "sensors/data");
        assert_eq!(config.window.capacity, 100);
        assert_eq!(config.window.history_hours, 6);
        assert_eq!(config.window.history_limit, 500);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        // Env access in tests is process-global; use a name nothing else reads.
        std::env::set_var("SENSORHUB_TEST_GARBAGE_PORT", "not-a-number");
        let result: Result<Option<u16>> = parse_var("SENSORHUB_TEST_GARBAGE_PORT");
        assert!(result.is_err());
        std::env::remove_var("SENSORHUB_TEST_GARBAGE_PORT");
    }

    #[test]
    fn parse_var_absent_is_none() {
        let result: Option<u16> = parse_var("SENSORHUB_TEST_DEFINITELY_UNSET").unwrap();
        assert!(result.is_none());
    }
}
