use hub_core::{ConnectionState, IngestEvent, Sample, SlidingWindow, Snapshot};
use tokio::sync::watch;
use tracing::{debug, info};

/// Single serialized owner of the window, connection state and counters.
///
/// Everything that mutates — seeding, live appends, state transitions —
/// goes through `&mut self` on one task, so an eviction and an insertion
/// can never race.  After every mutation exactly one new [`Snapshot`] is
/// published on the watch channel: consumers always see the latest state
/// and may skip intermediates, but never observe reordering.
pub struct Hub {
    window: SlidingWindow,
    connection: ConnectionState,
    message_count: u64,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl Hub {
    /// Create a hub with an empty window.  The watch channel starts with
    /// the empty snapshot so new subscribers always have a current value.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        Self {
            window: SlidingWindow::new(capacity),
            connection: ConnectionState::Connecting,
            message_count: 0,
            snapshot_tx,
        }
    }

    /// Subscribe to snapshot updates.  The receiver immediately holds the
    /// current snapshot; each subsequent change marks it ready again.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Replace the window with bootstrap history (oldest first) and notify.
    pub fn seed(&mut self, samples: Vec<Sample>) {
        info!("Seeding window with {} historical readings", samples.len());
        self.window.seed(samples);
        self.publish();
    }

    /// Apply one live event and notify.
    pub fn apply(&mut self, event: IngestEvent) {
        match event {
            IngestEvent::Connecting => self.connection = ConnectionState::Connecting,
            IngestEvent::Online => self.connection = ConnectionState::Online,
            IngestEvent::Offline => self.connection = ConnectionState::Offline,
            IngestEvent::Reading(sample) => {
                debug!(
                    "Reading #{}: temp={:?} hum={:?} light={}",
                    self.message_count + 1,
                    sample.temperature,
                    sample.humidity,
                    sample.light
                );
                self.window.append(sample);
                self.message_count += 1;
            }
        }
        self.publish();
    }

    /// Mark the channel offline and publish one final snapshot.  Called on
    /// shutdown, after the ingest task has stopped.
    pub fn finalize(&mut self) {
        self.connection = ConnectionState::Offline;
        self.publish();
    }

    /// Current state as an owned snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            latest: self.window.latest().cloned(),
            chart_data: self.window.to_vec(),
            stats: *self.window.stats(),
            connection: self.connection,
            message_count: self.message_count,
        }
    }

    #[must_use]
    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    #[must_use]
    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    fn publish(&self) {
        // send_replace never fails even with no subscribers.
        let _ = self.snapshot_tx.send_replace(self.snapshot());
    }
}
