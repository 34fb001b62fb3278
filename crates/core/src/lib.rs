pub mod error;
pub mod event;
pub mod sample;
pub mod state;
pub mod stats;
pub mod window;

pub use error::{HubError, Result};
pub use event::IngestEvent;
pub use sample::{LightStatus, RawReading, Sample};
pub use state::{ConnectionState, Snapshot};
pub use stats::{metric_stats, Metric, MetricStats, WindowStats};
pub use window::{SlidingWindow, DEFAULT_CAPACITY};
