//! Live MQTT ingestion for `sensorhub`.
//!
//! Bridges the broker to the hub: one subscription, payload parsing and
//! normalization, and connection-lifecycle tracking, all surfaced as
//! [`hub_core::IngestEvent`]s on a bounded channel.

pub mod client;
pub mod events;

pub use client::StreamIngestor;
pub use events::parse_payload;
