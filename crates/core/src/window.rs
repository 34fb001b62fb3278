//! Bounded FIFO window of recent samples with cached derived stats.

use std::collections::VecDeque;

use crate::sample::Sample;
use crate::stats::WindowStats;

/// Default number of readings kept in memory.
pub const DEFAULT_CAPACITY: usize = 100;

/// Fixed-capacity sliding window over the most recent samples.
///
/// The window and the stats derived from it are owned together so they can
/// never disagree: every mutation recomputes [`WindowStats`] before it
/// returns.  Eviction is strictly oldest-first.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
    stats: WindowStats,
}

impl SlidingWindow {
    /// Create an empty window.  A capacity of zero is clamped to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            stats: WindowStats::default(),
        }
    }

    /// Replace the entire window content with `samples` (oldest first),
    /// truncated to the *last* `capacity` entries when longer.
    ///
    /// Used once at startup to load persisted history before live readings
    /// arrive.  Calling it again simply replaces the window — the runtime
    /// serializes seed-before-append so it never does.
    pub fn seed<I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut incoming: VecDeque<Sample> = samples.into_iter().collect();
        if incoming.len() > self.capacity {
            incoming.drain(..incoming.len() - self.capacity);
        }
        self.samples = incoming;
        self.recompute();
    }

    /// Append a sample at the tail, evicting the head first when full.
    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.stats = WindowStats::compute(&self.samples);
    }

    /// Current contents, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Stats over the current contents.
    #[must_use]
    pub fn stats(&self) -> &WindowStats {
        &self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Owned chronological copy of the contents, for snapshots.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::LightStatus;
    use chrono::Utc;

    fn sample(temp: f64) -> Sample {
        Sample {
            temperature: Some(temp),
            humidity: None,
            light: LightStatus::Unknown,
            light_value: 0.0,
            captured_at: Utc::now(),
            display_time: String::new(),
        }
    }

    fn temps(window: &SlidingWindow) -> Vec<f64> {
        window.samples().filter_map(|s| s.temperature).collect()
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut window = SlidingWindow::new(5);
        for i in 0..50 {
            window.append(sample(f64::from(i)));
            assert!(window.len() <= 5);
        }
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut window = SlidingWindow::new(100);
        for i in 0..101 {
            window.append(sample(f64::from(i)));
        }
        assert_eq!(window.len(), 100);
        let contents = temps(&window);
        // 0 was evicted; 1..=100 remain in arrival order.
        assert_eq!(contents.first(), Some(&1.0));
        assert_eq!(contents.last(), Some(&100.0));
        assert_eq!(contents, (1..=100).map(f64::from).collect::<Vec<_>>());
    }

    #[test]
    fn stats_track_eviction_of_extremum() {
        let mut window = SlidingWindow::new(2);
        window.append(sample(99.0));
        window.append(sample(1.0));
        window.append(sample(2.0)); // evicts 99.0
        assert_eq!(window.stats().temperature.max, Some(2.0));
        assert_eq!(window.stats().temperature.min, Some(1.0));
    }

    #[test]
    fn seed_truncates_to_last_capacity_entries() {
        let mut window = SlidingWindow::new(3);
        window.seed((0..10).map(|i| sample(f64::from(i))));
        assert_eq!(temps(&window), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn seed_empty_then_append() {
        let mut window = SlidingWindow::new(10);
        window.seed(Vec::new());
        assert!(window.is_empty());
        window.append(sample(21.5));
        assert_eq!(window.len(), 1);
        assert_eq!(window.stats().temperature.avg, Some(21.5));
        assert_eq!(window.stats().humidity.avg, None);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut window = SlidingWindow::new(0);
        window.append(sample(1.0));
        window.append(sample(2.0));
        assert_eq!(temps(&window), vec![2.0]);
    }

    #[test]
    fn light_only_sample_occupies_a_slot() {
        let mut window = SlidingWindow::new(2);
        let light_only = Sample {
            temperature: None,
            humidity: None,
            light: LightStatus::Bright,
            light_value: 1.0,
            captured_at: Utc::now(),
            display_time: String::new(),
        };
        window.append(light_only);
        window.append(sample(20.0));
        assert_eq!(window.len(), 2);
        window.append(sample(21.0)); // light-only reading is evicted first
        assert_eq!(temps(&window), vec![20.0, 21.0]);
    }

    #[test]
    fn latest_is_tail() {
        let mut window = SlidingWindow::new(3);
        assert!(window.latest().is_none());
        window.append(sample(1.0));
        window.append(sample(2.0));
        assert_eq!(window.latest().and_then(|s| s.temperature), Some(2.0));
    }
}
