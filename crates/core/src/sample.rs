use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Light level reported by the sensor node's photoresistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightStatus {
    Bright,
    Dark,
    /// The payload carried no light information at all.
    Unknown,
}

impl LightStatus {
    /// Derive a status from the raw photoresistor value: `0` means the
    /// sensor is in the dark, anything else means it sees light.
    #[must_use]
    pub fn from_value(light_value: f64) -> Self {
        if light_value == 0.0 {
            Self::Dark
        } else {
            Self::Bright
        }
    }
}

impl std::fmt::Display for LightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bright => write!(f, "bright"),
            Self::Dark => write!(f, "dark"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single normalized telemetry reading.
///
/// Both the live MQTT path and the InfluxDB bootstrap path produce this
/// exact shape, so the window never has to care where a reading came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Degrees Celsius; `None` when the node omitted the field.
    pub temperature: Option<f64>,
    /// Percent relative humidity; `None` when the node omitted the field.
    pub humidity: Option<f64>,
    pub light: LightStatus,
    /// Raw photoresistor reading (`0.0` when absent from the input).
    pub light_value: f64,
    /// Source-of-truth time of measurement.
    pub captured_at: DateTime<Utc>,
    /// Local-time label for tables and chart axes.  Derived, not canonical.
    pub display_time: String,
}

impl Sample {
    /// `true` when the reading carries neither temperature nor humidity.
    /// Such light-only readings are still valid and still occupy a window
    /// slot.
    #[must_use]
    pub fn is_light_only(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none()
    }
}

/// Format a capture time the way the UI table/chart shows it.
#[must_use]
pub fn display_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Wire shape of one telemetry message on the `sensors/data` topic.
///
/// Every field is optional on the wire; [`RawReading::normalize`] applies
/// the defaulting rules.  Unknown extra fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light_status: Option<String>,
    pub light_value: Option<f64>,
    /// RFC 3339 measurement time; defaults to `received_at` when absent.
    pub timestamp: Option<String>,
}

impl RawReading {
    /// Normalize into a [`Sample`].
    ///
    /// - explicit `light_status` wins; otherwise it is derived from
    ///   `light_value` (`0` → dark, else bright); no light fields at all
    ///   → `Unknown`
    /// - a missing or unparseable `timestamp` falls back to `received_at`
    ///   (the ingestion-time clock)
    #[must_use]
    pub fn normalize(self, received_at: DateTime<Utc>) -> Sample {
        let light = match (self.light_status.as_deref(), self.light_value) {
            (Some("bright"), _) => LightStatus::Bright,
            (Some("dark"), _) => LightStatus::Dark,
            (Some(_), _) | (None, None) => LightStatus::Unknown,
            (None, Some(v)) => LightStatus::from_value(v),
        };

        let captured_at = self
            .timestamp
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or(received_at);

        Sample {
            temperature: self.temperature,
            humidity: self.humidity,
            light,
            light_value: self.light_value.unwrap_or(0.0),
            captured_at,
            display_time: display_time(captured_at),
        }
    }
}
