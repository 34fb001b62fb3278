use serde::{Deserialize, Serialize};

/// Root configuration, assembled from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HubConfig {
    /// MQTT broker connection settings.
    pub broker: BrokerConfig,
    /// InfluxDB query endpoint for the cold-start bootstrap.
    pub influx: InfluxConfig,
    /// In-memory window / history-bootstrap tuning.
    pub window: WindowConfig,
}

/// MQTT broker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    /// Topic carrying the sensor node's JSON telemetry.
    pub topic: String,
    pub client_id: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            topic: "sensors/data".to_string(),
            client_id: "sensorhub".to_string(),
        }
    }
}

/// InfluxDB 2.x endpoint used for the one-shot history query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            token: String::new(),
            org: "home".to_string(),
            bucket: "sensors".to_string(),
        }
    }
}

/// Window capacity and bootstrap bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Maximum number of readings kept in memory.
    pub capacity: usize,
    /// History bootstrap range: how far back to query, in hours.
    pub history_hours: u32,
    /// History bootstrap row cap.
    pub history_limit: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            history_hours: 6,
            history_limit: 500,
        }
    }
}
