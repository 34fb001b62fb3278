use crate::sample::Sample;

/// Events emitted by the live ingestion task toward the hub.
///
/// Sources:
/// - MQTT event loop  → `Connecting` / `Online` / `Offline`
/// - inbound publish  → `Reading` (already parsed and normalized)
///
/// Malformed payloads never become events — they are logged and dropped at
/// the parse layer so they cannot touch the window or the counters.
#[derive(Debug, Clone)]
pub enum IngestEvent {
    /// A (re)connection attempt has started.
    Connecting,
    /// The broker acknowledged our subscription.
    Online,
    /// Transport error or close; the client will retry in the background.
    Offline,
    /// One normalized live reading.
    Reading(Sample),
}
