//! Composite project-health scoring.
//!
//! Each dimension is a pure function of the collected inputs, assembled
//! through a weighted-sum table. External metric sources are optional
//! inputs with neutral defaults, not required collaborators.

use std::collections::BTreeMap;

use sprintlens_core::{Dimension, ExternalMetrics, HealthScore, HealthStatus, TrendDirection};
use tracing::debug;

use crate::stats::{mean, population_std_dev, round1};

/// Weight of one dimension in the overall score. Weights sum to 1.0 and
/// are pinned by test fixtures.
pub fn dimension_weight(dimension: Dimension) -> f64 {
    match dimension {
        Dimension::Delivery => 0.25,
        Dimension::Predictability => 0.20,
        Dimension::Quality => 0.15,
        Dimension::Efficiency => 0.15,
        Dimension::Sustainability => 0.15,
        Dimension::Financial => 0.10,
    }
}

/// Sub-score used when a dimension has no external data feeding it.
pub const NEUTRAL_SCORE: f64 = 70.0;

/// Everything the scorer consumes for one request.
#[derive(Debug, Clone)]
pub struct HealthInputs {
    /// Percentage of estimated scope completed
    pub completion_pct: f64,
    /// Items completed per active week
    pub velocity_items: f64,
    /// Coefficient of variation of weekly velocity, percent
    pub velocity_cv: f64,
    /// Direction of the recent velocity trend
    pub trend_direction: TrendDirection,
    /// Percentage change of recent velocity versus the window before
    pub recent_velocity_change: f64,
    /// Days ahead (+) or behind (-) the configured deadline
    pub schedule_variance_days: f64,
    /// Bucketed confidence in on-time completion
    pub completion_confidence: f64,
    /// Scope-creep rate, percent of baseline
    pub scope_change_rate: f64,
    /// Optional external quality/flow/budget metrics
    pub external: ExternalMetrics,
}

impl Default for HealthInputs {
    fn default() -> Self {
        Self {
            completion_pct: 0.0,
            velocity_items: 0.0,
            velocity_cv: 0.0,
            trend_direction: TrendDirection::Unknown,
            recent_velocity_change: 0.0,
            schedule_variance_days: 0.0,
            completion_confidence: 65.0,
            scope_change_rate: 0.0,
            external: ExternalMetrics::default(),
        }
    }
}

/// Coefficient of variation of weekly velocities, as a percentage.
/// Zero when the mean is zero or fewer than two weeks are available.
pub fn velocity_cv(weekly_velocities: &[f64]) -> f64 {
    if weekly_velocities.len() < 2 {
        return 0.0;
    }
    let m = mean(weekly_velocities);
    if m == 0.0 {
        return 0.0;
    }
    round1(population_std_dev(weekly_velocities) / m * 100.0)
}

/// Bucketed confidence from the schedule buffer
/// (`days_to_deadline - pert_days`).
pub fn completion_confidence(buffer_days: f64) -> f64 {
    if buffer_days >= 28.0 {
        95.0
    } else if buffer_days >= 14.0 {
        80.0
    } else if buffer_days >= 0.0 {
        65.0
    } else if buffer_days >= -14.0 {
        45.0
    } else {
        25.0
    }
}

/// `days_to_deadline - pert_days`; positive means ahead of schedule.
/// Zero when no deadline is configured; an unbounded PERT estimate reads
/// as maximally behind rather than producing a non-finite variance.
pub fn schedule_variance_days(days_to_deadline: Option<f64>, pert_days: f64) -> f64 {
    match days_to_deadline {
        None => 0.0,
        Some(days) if pert_days.is_finite() => days - pert_days,
        Some(_) => -(sprintlens_core::MAX_FORECAST_DAYS as f64),
    }
}

/// Combine the dimension sub-scores into an overall 0-100 score and
/// status label.
pub fn score(inputs: &HealthInputs) -> HealthScore {
    let mut dimension_scores = BTreeMap::new();
    let mut overall = 0.0;

    for dimension in Dimension::ALL {
        let sub_score = dimension_score(dimension, inputs).clamp(0.0, 100.0);
        overall += sub_score * dimension_weight(dimension);
        dimension_scores.insert(dimension.as_str().to_string(), round1(sub_score));
    }

    let overall_score = round1(overall.clamp(0.0, 100.0));
    debug!(overall_score, "computed health score");

    HealthScore {
        overall_score,
        dimension_scores,
        status: HealthStatus::from_score(overall_score),
    }
}

fn dimension_score(dimension: Dimension, inputs: &HealthInputs) -> f64 {
    match dimension {
        Dimension::Delivery => delivery(inputs),
        Dimension::Predictability => predictability(inputs),
        Dimension::Quality => quality(&inputs.external),
        Dimension::Efficiency => efficiency(&inputs.external),
        Dimension::Sustainability => sustainability(inputs),
        Dimension::Financial => financial(&inputs.external),
    }
}

/// Completion progress, schedule confidence, and schedule variance.
fn delivery(inputs: &HealthInputs) -> f64 {
    let schedule_score = (50.0 + 2.0 * inputs.schedule_variance_days).clamp(0.0, 100.0);
    0.4 * inputs.completion_pct + 0.4 * inputs.completion_confidence + 0.2 * schedule_score
}

/// Velocity volatility penalized, trend direction and recent change
/// folded in.
fn predictability(inputs: &HealthInputs) -> f64 {
    let base = 100.0 - inputs.velocity_cv.clamp(0.0, 100.0);
    let trend_adjustment = match inputs.trend_direction {
        TrendDirection::Increasing => 10.0,
        TrendDirection::Decreasing => -15.0,
        TrendDirection::Stable | TrendDirection::Unknown => 0.0,
    };
    base + trend_adjustment + (inputs.recent_velocity_change / 2.0).clamp(-10.0, 10.0)
}

/// Mean of the available defect/coverage/change-failure sub-scores;
/// neutral when none are supplied.
fn quality(external: &ExternalMetrics) -> f64 {
    let mut subscores = Vec::new();
    if let Some(defect_rate) = external.defect_rate {
        subscores.push((100.0 - 2.0 * defect_rate).clamp(0.0, 100.0));
    }
    if let Some(coverage) = external.test_coverage {
        subscores.push(coverage.clamp(0.0, 100.0));
    }
    if let Some(failure_rate) = external.change_failure_rate {
        subscores.push((100.0 - 2.0 * failure_rate).clamp(0.0, 100.0));
    }
    if subscores.is_empty() {
        NEUTRAL_SCORE
    } else {
        mean(&subscores)
    }
}

/// Flow efficiency and cycle time; neutral when neither is supplied.
fn efficiency(external: &ExternalMetrics) -> f64 {
    let mut subscores = Vec::new();
    if let Some(flow) = external.flow_efficiency {
        // 40% flow efficiency is already excellent in most delivery
        // pipelines, so scale up before clamping.
        subscores.push((flow * 2.5).clamp(0.0, 100.0));
    }
    if let Some(cycle_time) = external.cycle_time_days {
        subscores.push((100.0 - 4.0 * (cycle_time - 2.0)).clamp(0.0, 100.0));
    }
    if subscores.is_empty() {
        NEUTRAL_SCORE
    } else {
        mean(&subscores)
    }
}

/// Scope churn penalty, averaged with team load when that is reported.
fn sustainability(inputs: &HealthInputs) -> f64 {
    let scope_score = 100.0 - (2.0 * inputs.scope_change_rate).clamp(0.0, 100.0);
    match inputs.external.team_load_pct {
        Some(load) => (scope_score + (150.0 - load).clamp(0.0, 100.0)) / 2.0,
        None => scope_score,
    }
}

/// Budget burn ahead of schedule progress is the penalty; neutral unless
/// both figures are reported.
fn financial(external: &ExternalMetrics) -> f64 {
    match (external.budget_consumed_pct, external.schedule_elapsed_pct) {
        (Some(budget), Some(elapsed)) => {
            (100.0 - 2.0 * (budget - elapsed).max(0.0)).clamp(0.0, 100.0)
        }
        _ => NEUTRAL_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = Dimension::ALL.iter().map(|&d| dimension_weight(d)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_reports_every_dimension() {
        let health = score(&HealthInputs::default());
        assert_eq!(health.dimension_scores.len(), Dimension::ALL.len());
        for dimension in Dimension::ALL {
            assert!(health.dimension_scores.contains_key(dimension.as_str()));
        }
    }

    #[test]
    fn test_velocity_cv() {
        assert_eq!(velocity_cv(&[]), 0.0);
        assert_eq!(velocity_cv(&[5.0]), 0.0);
        assert_eq!(velocity_cv(&[0.0, 0.0]), 0.0);
        // mean 15, population std dev 5 -> 33.3%
        assert_eq!(velocity_cv(&[10.0, 20.0]), 33.3);
    }

    #[test]
    fn test_completion_confidence_buckets() {
        assert_eq!(completion_confidence(28.0), 95.0);
        assert_eq!(completion_confidence(27.9), 80.0);
        assert_eq!(completion_confidence(14.0), 80.0);
        assert_eq!(completion_confidence(0.0), 65.0);
        assert_eq!(completion_confidence(-14.0), 45.0);
        assert_eq!(completion_confidence(-14.1), 25.0);
    }

    #[test]
    fn test_schedule_variance() {
        assert_eq!(schedule_variance_days(None, 40.0), 0.0);
        assert_eq!(schedule_variance_days(Some(60.0), 40.0), 20.0);
        assert_eq!(schedule_variance_days(Some(30.0), 40.0), -10.0);
        assert_eq!(
            schedule_variance_days(Some(30.0), f64::INFINITY),
            -(sprintlens_core::MAX_FORECAST_DAYS as f64)
        );
    }

    #[test]
    fn test_healthy_fixture() {
        let inputs = HealthInputs {
            completion_pct: 60.0,
            velocity_items: 8.0,
            velocity_cv: 20.0,
            trend_direction: TrendDirection::Increasing,
            recent_velocity_change: 25.0,
            schedule_variance_days: 20.0,
            completion_confidence: 80.0,
            scope_change_rate: 10.0,
            external: ExternalMetrics::default(),
        };
        let health = score(&inputs);
        // delivery 74, predictability 100, sustainability 80, the
        // externally-fed dimensions neutral at 70
        assert_eq!(health.dimension_scores["delivery"], 74.0);
        assert_eq!(health.dimension_scores["predictability"], 100.0);
        assert_eq!(health.dimension_scores["quality"], NEUTRAL_SCORE);
        assert_eq!(health.dimension_scores["sustainability"], 80.0);
        assert_eq!(health.overall_score, 78.5);
        assert_eq!(health.status, HealthStatus::Good);
    }

    #[test]
    fn test_struggling_fixture() {
        let inputs = HealthInputs {
            completion_pct: 20.0,
            velocity_items: 2.0,
            velocity_cv: 80.0,
            trend_direction: TrendDirection::Decreasing,
            recent_velocity_change: -30.0,
            schedule_variance_days: -30.0,
            completion_confidence: 25.0,
            scope_change_rate: 40.0,
            external: ExternalMetrics::default(),
        };
        let health = score(&inputs);
        assert_eq!(health.dimension_scores["delivery"], 18.0);
        assert_eq!(health.dimension_scores["predictability"], 0.0);
        assert_eq!(health.dimension_scores["sustainability"], 20.0);
        assert_eq!(health.overall_score, 35.5);
        assert_eq!(health.status, HealthStatus::AtRisk);
    }

    #[test]
    fn test_external_metrics_feed_dimensions() {
        let inputs = HealthInputs {
            external: ExternalMetrics {
                defect_rate: Some(10.0),
                test_coverage: Some(80.0),
                change_failure_rate: Some(5.0),
                flow_efficiency: Some(30.0),
                cycle_time_days: Some(4.0),
                team_load_pct: Some(100.0),
                budget_consumed_pct: Some(80.0),
                schedule_elapsed_pct: Some(60.0),
            },
            ..HealthInputs::default()
        };
        let health = score(&inputs);
        // quality: mean(80, 80, 90) = 83.3
        assert_eq!(health.dimension_scores["quality"], 83.3);
        // efficiency: mean(75, 92) = 83.5
        assert_eq!(health.dimension_scores["efficiency"], 83.5);
        // sustainability: (100 + 50) / 2 = 75
        assert_eq!(health.dimension_scores["sustainability"], 75.0);
        // financial: 100 - 2 * 20 = 60
        assert_eq!(health.dimension_scores["financial"], 60.0);
    }

    #[test]
    fn test_each_external_source_substitutable_independently() {
        let only_coverage = HealthInputs {
            external: ExternalMetrics {
                test_coverage: Some(90.0),
                ..ExternalMetrics::default()
            },
            ..HealthInputs::default()
        };
        let health = score(&only_coverage);
        assert_eq!(health.dimension_scores["quality"], 90.0);
        assert_eq!(health.dimension_scores["efficiency"], NEUTRAL_SCORE);
        assert_eq!(health.dimension_scores["financial"], NEUTRAL_SCORE);
    }

    #[test]
    fn test_overall_score_clamped() {
        let inputs = HealthInputs {
            completion_pct: 1000.0,
            completion_confidence: 1000.0,
            schedule_variance_days: 1000.0,
            velocity_cv: -100.0,
            recent_velocity_change: 1000.0,
            trend_direction: TrendDirection::Increasing,
            ..HealthInputs::default()
        };
        let health = score(&inputs);
        assert!(health.overall_score <= 100.0);
        for sub_score in health.dimension_scores.values() {
            assert!((0.0..=100.0).contains(sub_score));
        }
    }
}
