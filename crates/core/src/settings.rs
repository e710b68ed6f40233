//! Caller-supplied analysis configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::health::ExternalMetrics;

/// Settings supplied by the persistence/profile layer for one analytics
/// request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// PERT selection width: how many best/worst weeks feed the
    /// optimistic and pessimistic rates. Clamped against the dataset size
    /// before use.
    pub pert_factor: f64,

    /// Project deadline, if one is configured
    pub deadline: Option<NaiveDate>,

    /// Analysis window as a number of most-recent ISO weeks. `None` means
    /// use all data. This counts weekly buckets, never raw rows.
    pub weeks: Option<usize>,

    /// Total item scope estimated for the project
    pub estimated_total_items: Option<f64>,

    /// Total point scope estimated for the project
    pub estimated_total_points: Option<f64>,

    /// Optional external quality/flow/budget metrics
    pub external: ExternalMetrics,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            pert_factor: 3.0,
            deadline: None,
            weeks: None,
            estimated_total_items: None,
            estimated_total_points: None,
            external: ExternalMetrics::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.pert_factor, 3.0);
        assert!(settings.deadline.is_none());
        assert!(settings.weeks.is_none());
        assert!(settings.estimated_total_items.is_none());
    }

    #[test]
    fn test_settings_deserialize_with_partial_fields() {
        let settings: AnalysisSettings = serde_json::from_str(
            r#"{
                "pert_factor": 2.0,
                "deadline": "2025-06-30",
                "weeks": 12,
                "estimated_total_items": 120.0,
                "estimated_total_points": null,
                "external": {}
            }"#,
        )
        .unwrap();
        assert_eq!(settings.pert_factor, 2.0);
        assert_eq!(settings.weeks, Some(12));
        assert_eq!(
            settings.deadline,
            Some(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
        );
        assert!(settings.external.defect_rate.is_none());
    }
}
