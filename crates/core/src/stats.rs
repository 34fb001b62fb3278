//! Pure min/max/avg derivation over a sequence of samples.
//!
//! Stats are always recomputed by a full scan of the current window: FIFO
//! eviction can remove the current extremum, which incremental tracking
//! cannot cheaply survive.

use crate::sample::Sample;

/// Which numeric metric of a [`Sample`] to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
}

impl Metric {
    fn select(self, sample: &Sample) -> Option<f64> {
        match self {
            Self::Temperature => sample.temperature,
            Self::Humidity => sample.humidity,
        }
    }
}

/// Min/max/avg for one metric, each rounded to one decimal place.
///
/// `None` means "no data" — the metric was absent from every sample in the
/// window.  Consumers render it as a dash, never as `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl MetricStats {
    pub const EMPTY: Self = Self {
        min: None,
        max: None,
        avg: None,
    };
}

/// Stats for every metric the window tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowStats {
    pub temperature: MetricStats,
    pub humidity: MetricStats,
}

impl WindowStats {
    /// Recompute all metric stats from scratch.  O(n) per metric.
    #[must_use]
    pub fn compute<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a Sample> + Copy,
    {
        Self {
            temperature: metric_stats(samples, Metric::Temperature),
            humidity: metric_stats(samples, Metric::Humidity),
        }
    }
}

/// Derive `{min, max, avg}` of one metric over `samples`.
///
/// Samples where the metric is absent are skipped; an empty filtered
/// sequence yields [`MetricStats::EMPTY`].  Pure and order-independent.
#[must_use]
pub fn metric_stats<'a, I>(samples: I, metric: Metric) -> MetricStats
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0u32;

    for value in samples.into_iter().filter_map(|s| metric.select(s)) {
        min = min.min(value);
        max = max.max(value);
        sum += value;
        count += 1;
    }

    if count == 0 {
        return MetricStats::EMPTY;
    }

    MetricStats {
        min: Some(round1(min)),
        max: Some(round1(max)),
        avg: Some(round1(sum / f64::from(count))),
    }
}

/// Round to one decimal place, matching what the UI displays.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Render an optional stat value, using a dash for "no data".
#[must_use]
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{LightStatus, Sample};
    use chrono::Utc;

    fn sample(temperature: Option<f64>, humidity: Option<f64>) -> Sample {
        Sample {
            temperature,
            humidity,
            light: LightStatus::Unknown,
            light_value: 0.0,
            captured_at: Utc::now(),
            display_time: String::new(),
        }
    }

    #[test]
    fn computes_extrema_and_mean() {
        let samples = vec![
            sample(Some(20.0), Some(40.0)),
            sample(Some(22.46), Some(41.0)),
            sample(Some(21.0), None),
        ];
        let stats = metric_stats(&samples, Metric::Temperature);
        assert_eq!(stats.min, Some(20.0));
        assert_eq!(stats.max, Some(22.5));
        assert_eq!(stats.avg, Some(21.2));
    }

    #[test]
    fn skips_absent_values() {
        let samples = vec![
            sample(None, Some(55.0)),
            sample(Some(18.0), None),
            sample(None, Some(65.0)),
        ];
        let stats = metric_stats(&samples, Metric::Humidity);
        assert_eq!(stats.min, Some(55.0));
        assert_eq!(stats.max, Some(65.0));
        assert_eq!(stats.avg, Some(60.0));
    }

    #[test]
    fn empty_series_yields_no_data_sentinel() {
        let samples: Vec<Sample> = vec![sample(None, None)];
        let stats = metric_stats(&samples, Metric::Temperature);
        assert_eq!(stats, MetricStats::EMPTY);
        assert_eq!(format_stat(stats.avg), "–");
    }

    #[test]
    fn order_independent() {
        let a = vec![
            sample(Some(1.0), None),
            sample(Some(5.0), None),
            sample(Some(3.0), None),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(
            metric_stats(&a, Metric::Temperature),
            metric_stats(&b, Metric::Temperature)
        );
    }

    #[test]
    fn idempotent() {
        let samples = vec![sample(Some(2.0), Some(3.0))];
        let first = WindowStats::compute(&samples);
        let second = WindowStats::compute(&samples);
        assert_eq!(first, second);
    }

    #[test]
    fn single_sample_stats() {
        let samples = vec![sample(Some(19.95), None)];
        let stats = metric_stats(&samples, Metric::Temperature);
        assert_eq!(stats.min, Some(20.0));
        assert_eq!(stats.max, Some(20.0));
        assert_eq!(stats.avg, Some(20.0));
    }
}
