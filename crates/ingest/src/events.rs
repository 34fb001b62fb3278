use chrono::{DateTime, Utc};
use hub_core::{HubError, RawReading, Result, Sample};

/// Parse one raw MQTT payload into a normalized [`Sample`].
///
/// The payload must be a JSON object; unknown fields are ignored and every
/// known field is optional.  `received_at` supplies the capture time when
/// the payload carries none.  A malformed payload is an error — the caller
/// logs and drops it without touching the window or the counters.
pub fn parse_payload(payload: &[u8], received_at: DateTime<Utc>) -> Result<Sample> {
    let raw: RawReading = serde_json::from_slice(payload)
        .map_err(|e| HubError::Parse(format!("bad telemetry payload: {e}")))?;
    Ok(raw.normalize(received_at))
}
