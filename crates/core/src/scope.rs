//! Scope baseline, creep, stability, and growth metrics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scope as of the start of the analysis window.
///
/// Defined as current remaining plus completed-in-window. Created-in-window
/// work is growth, not baseline, and is never added here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeBaseline {
    /// Baseline item count
    pub baseline_items: f64,
    /// Baseline point count
    pub baseline_points: f64,
}

/// Created work relative to the baseline, as a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeCreepRate {
    /// Created items as a percentage of baseline items
    pub items_rate: f64,
    /// Created points as a percentage of baseline points
    pub points_rate: f64,
}

/// `1 - created / current_total`, bounded to `[0, 1]`.
///
/// `1.0` means no backlog growth was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScopeStability {
    /// Stability of the item scope
    pub items_stability: f64,
    /// Stability of the point scope
    pub points_stability: f64,
}

impl Default for ScopeStability {
    fn default() -> Self {
        Self {
            items_stability: 1.0,
            points_stability: 1.0,
        }
    }
}

/// Net scope growth (created minus completed) for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyGrowth {
    /// Week label in `"YYYY-Wnn"` form
    pub week_label: String,
    /// Monday of the week
    pub start_date: NaiveDate,
    /// Net item growth in the week
    pub items_growth: f64,
    /// Net point growth in the week
    pub points_growth: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stability_defaults_to_perfectly_stable() {
        let stability = ScopeStability::default();
        assert_eq!(stability.items_stability, 1.0);
        assert_eq!(stability.points_stability, 1.0);
    }
}
