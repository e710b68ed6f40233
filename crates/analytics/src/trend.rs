//! Before/after trend classification.

use sprintlens_core::{Metric, TrendAnalysis, TrendDirection, WeeklyBucket};

use crate::stats::{mean, round1};

/// Percentage change at or above which a trend is significant.
const SIGNIFICANCE_THRESHOLD: f64 = 20.0;

/// Classifies recent performance direction from a before/after split of
/// the most recent weekly buckets.
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    /// Width of each compared half, in weeks
    pub weeks_to_compare: usize,
    /// Percentage change below which the trend reads as stable. The
    /// default is 10; callers with a tighter domain convention pass their
    /// own.
    pub stable_threshold: f64,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self {
            weeks_to_compare: 4,
            stable_threshold: 10.0,
        }
    }
}

impl TrendAnalyzer {
    /// Analyzer comparing `weeks_to_compare`-week halves with the default
    /// stability threshold.
    pub fn new(weeks_to_compare: usize) -> Self {
        Self {
            weeks_to_compare,
            ..Self::default()
        }
    }

    /// Override the small-variation threshold.
    pub fn with_stable_threshold(mut self, threshold: f64) -> Self {
        self.stable_threshold = threshold;
        self
    }

    /// Compare the most recent `weeks_to_compare` buckets against the
    /// `weeks_to_compare` before them.
    ///
    /// Fewer than `2 * weeks_to_compare` buckets yield the neutral
    /// unknown result.
    pub fn analyze(&self, buckets: &[WeeklyBucket], metric: Metric) -> TrendAnalysis {
        let needed = self.weeks_to_compare * 2;
        if needed == 0 || buckets.len() < needed {
            return TrendAnalysis::unknown();
        }

        let window = &buckets[buckets.len() - needed..];
        let (older, recent) = window.split_at(self.weeks_to_compare);
        let previous_avg = mean(&older.iter().map(|b| b.metric(metric)).collect::<Vec<_>>());
        let current_avg = mean(&recent.iter().map(|b| b.metric(metric)).collect::<Vec<_>>());

        let percent_change = if previous_avg == 0.0 {
            current_avg * 100.0
        } else {
            (current_avg - previous_avg) / previous_avg * 100.0
        };

        let direction = if percent_change.abs() < self.stable_threshold {
            TrendDirection::Stable
        } else if percent_change > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };

        TrendAnalysis {
            direction,
            percent_change: round1(percent_change),
            current_avg: round1(current_avg),
            previous_avg: round1(previous_avg),
            is_significant: percent_change.abs() >= SIGNIFICANCE_THRESHOLD,
        }
    }
}
