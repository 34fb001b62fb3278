use crate::events::parse_payload;
use chrono::Utc;
use hub_config::BrokerConfig;
use hub_core::IngestEvent;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// MQTT keep-alive interval.
const KEEP_ALIVE: Duration = Duration::from_secs(30);
/// Pause before re-polling after a transport error.
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Live telemetry ingestor.
///
/// Subscribes to a single topic on the configured broker and streams typed
/// [`IngestEvent`]s.  The underlying client reconnects automatically if the
/// broker connection drops; each cycle re-emits `Connecting` and `Online`.
pub struct StreamIngestor {
    config: BrokerConfig,
}

impl StreamIngestor {
    #[must_use]
    pub fn new(config: BrokerConfig) -> Self {
        Self { config }
    }

    /// Spawn a background task that polls the broker and forwards typed
    /// [`IngestEvent`]s on the returned channel.
    ///
    /// Exactly one subscription is held per connection cycle.  Malformed
    /// payloads are logged and dropped without emitting an event.  The task
    /// disconnects and stops when the receiver is dropped.
    pub fn spawn_listener(self) -> mpsc::Receiver<IngestEvent> {
        let (tx, rx) = mpsc::channel(64);
        let BrokerConfig {
            host,
            port,
            topic,
            client_id,
        } = self.config;

        tokio::spawn(async move {
            let mut options = MqttOptions::new(client_id, host.clone(), port);
            options.set_keep_alive(KEEP_ALIVE);
            let (client, mut eventloop) = AsyncClient::new(options, 64);

            if tx.send(IngestEvent::Connecting).await.is_err() {
                return; // receiver dropped before we even started
            }
            info!("Connecting to MQTT broker at {host}:{port}");

            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        // (Re)connected: the broker forgets subscriptions on
                        // a clean session, so subscribe on every ConnAck.
                        if let Err(e) = client.subscribe(topic.clone(), QoS::AtLeastOnce).await {
                            error!("Cannot queue subscribe to '{topic}': {e}");
                        }
                    }
                    Ok(Event::Incoming(Packet::SubAck(_))) => {
                        info!("Subscribed to '{topic}'");
                        if tx.send(IngestEvent::Online).await.is_err() {
                            break;
                        }
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        match parse_payload(&publish.payload, Utc::now()) {
                            Ok(sample) => {
                                if tx.send(IngestEvent::Reading(sample)).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!("Dropping message on '{}': {e}", publish.topic),
                        }
                    }
                    Ok(_) => {} // pings, acks — nothing to forward
                    Err(e) => {
                        warn!("MQTT connection lost: {e}; retrying in {RECONNECT_DELAY:?}");
                        if tx.send(IngestEvent::Offline).await.is_err() {
                            break;
                        }
                        tokio::time::sleep(RECONNECT_DELAY).await;
                        if tx.send(IngestEvent::Connecting).await.is_err() {
                            break;
                        }
                    }
                }
            }

            // Receiver gone — tear the subscription down promptly.
            let _ = client.disconnect().await;
            info!("Ingest listener stopped");
        });

        rx
    }
}
