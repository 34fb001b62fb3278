use serde::{Deserialize, Serialize};

use crate::sample::Sample;
use crate::stats::WindowStats;

/// Lifecycle status of the live telemetry channel.
///
/// Starts at `Connecting`; reaches `Online` once the broker acknowledges
/// the subscription; drops to `Offline` on any transport error or close.
/// A reconnect cycle passes through `Connecting` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Online,
    Offline,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::Connecting
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Point-in-time view of everything a consumer needs — the latest reading,
/// the chart series, derived stats, channel status and the running message
/// count.  Published last-value-wins; holding a snapshot never lets a
/// consumer observe later mutation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Most recent reading, if any has arrived or been loaded.
    pub latest: Option<Sample>,
    /// Window contents in chronological (oldest-first) order.
    pub chart_data: Vec<Sample>,
    /// Min/max/avg per metric over `chart_data`.
    pub stats: WindowStats,
    pub connection: ConnectionState,
    /// Live messages accepted so far (parse failures excluded).
    pub message_count: u64,
}
