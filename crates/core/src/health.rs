//! Composite project-health scoring types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status label derived from the overall score.
///
/// Serializes as the dashboard label (`"AT RISK"`, not the variant
/// name), so reports read the same on the wire as on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Score >= 70
    #[serde(rename = "GOOD")]
    Good,
    /// Score >= 50
    #[serde(rename = "CAUTION")]
    Caution,
    /// Score >= 30
    #[serde(rename = "AT RISK")]
    AtRisk,
    /// Score < 30
    #[serde(rename = "CRITICAL")]
    Critical,
}

impl HealthStatus {
    /// Map an overall score to its status. Thresholds are inclusive lower
    /// bounds: 70, 50, 30.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            HealthStatus::Good
        } else if score >= 50.0 {
            HealthStatus::Caution
        } else if score >= 30.0 {
            HealthStatus::AtRisk
        } else {
            HealthStatus::Critical
        }
    }

    /// Label as rendered on dashboards.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Good => "GOOD",
            HealthStatus::Caution => "CAUTION",
            HealthStatus::AtRisk => "AT RISK",
            HealthStatus::Critical => "CRITICAL",
        }
    }
}

/// The six scored health dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    /// Completion progress and schedule confidence
    Delivery,
    /// Velocity volatility and trend
    Predictability,
    /// Defect and test signals (external)
    Quality,
    /// Flow and throughput signals (external)
    Efficiency,
    /// Scope churn and team load
    Sustainability,
    /// Budget burn versus schedule (external)
    Financial,
}

impl Dimension {
    /// All dimensions, in reporting order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Delivery,
        Dimension::Predictability,
        Dimension::Quality,
        Dimension::Efficiency,
        Dimension::Sustainability,
        Dimension::Financial,
    ];

    /// Dimension name as used in `dimension_scores` keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Delivery => "delivery",
            Dimension::Predictability => "predictability",
            Dimension::Quality => "quality",
            Dimension::Efficiency => "efficiency",
            Dimension::Sustainability => "sustainability",
            Dimension::Financial => "financial",
        }
    }
}

/// Optional externally-sourced metrics feeding the Quality, Efficiency,
/// Sustainability, and Financial dimensions.
///
/// Each field is independently substitutable: when absent, the affected
/// dimension falls back to a documented neutral score instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalMetrics {
    /// Percentage of delivered work that bounced back as defects
    pub defect_rate: Option<f64>,

    /// Test coverage percentage
    pub test_coverage: Option<f64>,

    /// DORA change-failure rate percentage
    pub change_failure_rate: Option<f64>,

    /// Flow efficiency percentage (active time / total cycle time)
    pub flow_efficiency: Option<f64>,

    /// Average cycle time in days
    pub cycle_time_days: Option<f64>,

    /// Team load as a percentage of sustainable capacity
    pub team_load_pct: Option<f64>,

    /// Budget consumed, percentage
    pub budget_consumed_pct: Option<f64>,

    /// Schedule elapsed, percentage
    pub schedule_elapsed_pct: Option<f64>,
}

/// Composite health score for one analytics request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Weighted overall score, clamped to `[0, 100]`
    pub overall_score: f64,

    /// Per-dimension sub-scores, keyed by dimension name
    pub dimension_scores: BTreeMap<String, f64>,

    /// Status label derived from `overall_score`
    pub status: HealthStatus,
}
