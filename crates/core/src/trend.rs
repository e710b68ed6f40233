//! Trend classification of recent performance.

use serde::{Deserialize, Serialize};

/// Direction of a metric over the compared windows.
///
/// Serializes lowercase, matching [`TrendDirection::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Recent average is meaningfully above the older one
    Increasing,
    /// Variation stayed below the stability threshold
    Stable,
    /// Recent average is meaningfully below the older one
    Decreasing,
    /// Not enough aggregated weeks to compare
    Unknown,
}

impl TrendDirection {
    /// String form used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Stable => "stable",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Unknown => "unknown",
        }
    }
}

/// Result of comparing a recent window against the one before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Classified direction
    pub direction: TrendDirection,
    /// Percentage change from the older to the recent window
    pub percent_change: f64,
    /// Mean of the recent window
    pub current_avg: f64,
    /// Mean of the older window
    pub previous_avg: f64,
    /// Whether the change is large enough (>= 20%) to act on
    pub is_significant: bool,
}

impl TrendAnalysis {
    /// The neutral result returned when there is too little data.
    pub fn unknown() -> Self {
        Self {
            direction: TrendDirection::Unknown,
            percent_change: 0.0,
            current_avg: 0.0,
            previous_avg: 0.0,
            is_significant: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_trend_is_neutral() {
        let trend = TrendAnalysis::unknown();
        assert_eq!(trend.direction, TrendDirection::Unknown);
        assert_eq!(trend.percent_change, 0.0);
        assert!(!trend.is_significant);
    }

    #[test]
    fn test_direction_strings() {
        assert_eq!(TrendDirection::Increasing.as_str(), "increasing");
        assert_eq!(TrendDirection::Stable.as_str(), "stable");
        assert_eq!(TrendDirection::Decreasing.as_str(), "decreasing");
        assert_eq!(TrendDirection::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_direction_serializes_as_report_label() {
        for direction in [
            TrendDirection::Increasing,
            TrendDirection::Stable,
            TrendDirection::Decreasing,
            TrendDirection::Unknown,
        ] {
            let json = serde_json::to_string(&direction).unwrap();
            assert_eq!(json, format!("\"{}\"", direction.as_str()));
        }
    }
}
