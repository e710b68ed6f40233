//! Orchestration: one pass from raw rows to a full report.

use chrono::{Duration, NaiveDate};
use sprintlens_core::{
    AnalysisReport, AnalysisSettings, ForecastBundle, Metric, RawObservation, WeeklyBucket,
};
use tracing::{debug, info};

use crate::aggregate::{aggregate_weekly, recent_weeks};
use crate::estimator::estimate_rates;
use crate::forecast::forecast_bundles;
use crate::health::{
    completion_confidence, schedule_variance_days, score, velocity_cv, HealthInputs,
};
use crate::scope::{baseline, scope_creep_rate, scope_stability_index, weekly_scope_growth};
use crate::trend::TrendAnalyzer;
use crate::velocity::velocity;

/// Confidence used when no deadline is configured.
const NO_DEADLINE_CONFIDENCE: f64 = 65.0;

/// Pure, single-threaded analytics pipeline.
///
/// Every call is a fresh transformation of the caller's rows; nothing is
/// cached or mutated between calls, so concurrent requests only need
/// their own copies of the input.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    settings: AnalysisSettings,
}

impl AnalyticsEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    /// The settings this engine was built with.
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Run the full pipeline over one set of observation rows.
    pub fn analyze(&self, records: &[RawObservation]) -> AnalysisReport {
        let all_buckets = aggregate_weekly(records);
        let buckets = match self.settings.weeks {
            Some(weeks) => recent_weeks(&all_buckets, weeks),
            None => all_buckets.clone(),
        };
        info!(
            rows = records.len(),
            weeks = buckets.len(),
            "running analytics pass"
        );

        // Scope completion is project-global, so remaining work is derived
        // from the unfiltered record set even when a window is configured.
        let completed_items: f64 = all_buckets.iter().map(|b| b.completed_items).sum();
        let completed_points: f64 = all_buckets.iter().map(|b| b.completed_points).sum();
        let remaining_items = remaining(self.settings.estimated_total_items, completed_items);
        let remaining_points = remaining(self.settings.estimated_total_points, completed_points);

        let velocity_items = velocity(&buckets, Metric::CompletedItems);
        let velocity_points = velocity(&buckets, Metric::CompletedPoints);
        let estimate = estimate_rates(
            &buckets,
            remaining_items,
            remaining_points,
            self.settings.pert_factor,
        );

        let (burndown, burnup) = match forecast_start(&buckets) {
            Some(start_date) => {
                let total_scope = self
                    .settings
                    .estimated_total_items
                    .unwrap_or(completed_items + remaining_items);
                forecast_bundles(
                    remaining_items,
                    completed_items,
                    total_scope,
                    &estimate,
                    start_date,
                )
            }
            None => (ForecastBundle::default(), ForecastBundle::default()),
        };

        let scope_baseline = baseline(&buckets, remaining_items, remaining_points);
        let scope_creep = scope_creep_rate(&buckets, &scope_baseline);
        let scope_stability = scope_stability_index(&buckets, &scope_baseline);
        let weekly_growth = weekly_scope_growth(&buckets);

        let trend = TrendAnalyzer::default().analyze(&buckets, Metric::CompletedItems);

        let health = score(&self.health_inputs(
            &buckets,
            completed_items,
            velocity_items,
            &trend,
            estimate.pert_time_items_days,
            scope_creep.items_rate,
        ));

        AnalysisReport {
            buckets,
            velocity_items,
            velocity_points,
            remaining_items,
            remaining_points,
            estimate,
            burndown,
            burnup,
            baseline: scope_baseline,
            scope_creep,
            scope_stability,
            weekly_growth,
            trend,
            health,
        }
    }

    fn health_inputs(
        &self,
        buckets: &[WeeklyBucket],
        completed_items: f64,
        velocity_items: f64,
        trend: &sprintlens_core::TrendAnalysis,
        pert_days: f64,
        scope_change_rate: f64,
    ) -> HealthInputs {
        let completion_pct = match self.settings.estimated_total_items {
            Some(total) if total > 0.0 => (completed_items / total * 100.0).clamp(0.0, 100.0),
            _ => 0.0,
        };

        let weekly: Vec<f64> = buckets.iter().map(|b| b.completed_items).collect();
        let cv = velocity_cv(&weekly);

        let days_to_deadline = match (self.settings.deadline, forecast_start(buckets)) {
            (Some(deadline), Some(start)) => Some((deadline - start).num_days() as f64),
            _ => None,
        };
        let variance = schedule_variance_days(days_to_deadline, pert_days);
        let confidence = match days_to_deadline {
            Some(days) => completion_confidence(days - pert_days),
            None => NO_DEADLINE_CONFIDENCE,
        };
        debug!(completion_pct, cv, variance, "assembled health inputs");

        HealthInputs {
            completion_pct,
            velocity_items,
            velocity_cv: cv,
            trend_direction: trend.direction,
            recent_velocity_change: trend.percent_change,
            schedule_variance_days: variance,
            completion_confidence: confidence,
            scope_change_rate,
            external: self.settings.external.clone(),
        }
    }
}

/// Forecasts start the week after the last observed bucket; no data means
/// no forecast.
fn forecast_start(buckets: &[WeeklyBucket]) -> Option<NaiveDate> {
    buckets.last().map(|b| b.start_date + Duration::days(7))
}

fn remaining(estimated_total: Option<f64>, completed: f64) -> f64 {
    estimated_total.map_or(0.0, |total| (total - completed).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintlens_core::{HealthStatus, TrendDirection};

    fn weekly_records(completed: &[f64], created: &[f64]) -> Vec<RawObservation> {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        completed
            .iter()
            .enumerate()
            .map(|(week, &done)| {
                let date = start + Duration::weeks(week as i64);
                let added = created.get(week).copied().unwrap_or(0.0);
                RawObservation::new(
                    date.format("%Y-%m-%d").to_string(),
                    done,
                    done * 2.0,
                    added,
                    added * 2.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_records_degrade_gracefully() {
        let report = AnalyticsEngine::default().analyze(&[]);
        assert!(report.buckets.is_empty());
        assert_eq!(report.velocity_items, 0.0);
        assert_eq!(report.estimate, sprintlens_core::RateEstimate::zero());
        assert!(report.burndown.average.is_empty());
        assert_eq!(report.trend.direction, TrendDirection::Unknown);
        // Neutral defaults keep the score mid-range instead of flagging an
        // empty project as a disaster.
        assert!((0.0..=100.0).contains(&report.health.overall_score));
        assert_ne!(report.health.status, HealthStatus::Critical);
    }

    #[test]
    fn test_full_pipeline() {
        let records = weekly_records(
            &[5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0],
            &[3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        let settings = AnalysisSettings {
            estimated_total_items: Some(100.0),
            estimated_total_points: Some(200.0),
            ..AnalysisSettings::default()
        };
        let report = AnalyticsEngine::new(settings).analyze(&records);

        assert_eq!(report.buckets.len(), 8);
        // 68 completed of 100 estimated
        assert_eq!(report.remaining_items, 32.0);
        assert_eq!(report.velocity_items, 8.5);
        assert!(report.estimate.pert_time_items_days > 0.0);
        assert!(report.estimate.pert_time_items_days.is_finite());

        // Forecast starts the week after the last bucket.
        let expected_start = chrono::NaiveDate::from_ymd_opt(2024, 2, 26).unwrap();
        assert_eq!(report.burndown.average.start_date(), Some(expected_start));
        assert_eq!(report.burndown.average.points.last().unwrap().value, 0.0);
        assert_eq!(
            report.burndown.average.end_date(),
            report.burnup.average.end_date()
        );

        // Completed items ramp up, so the trend is increasing.
        assert_eq!(report.trend.direction, TrendDirection::Increasing);
        assert_eq!(report.weekly_growth.len(), 8);
    }

    #[test]
    fn test_week_window_filters_buckets() {
        let records = weekly_records(&[1.0, 1.0, 1.0, 1.0, 9.0, 9.0], &[0.0; 6]);
        let settings = AnalysisSettings {
            weeks: Some(2),
            estimated_total_items: Some(50.0),
            ..AnalysisSettings::default()
        };
        let report = AnalyticsEngine::new(settings).analyze(&records);
        assert_eq!(report.buckets.len(), 2);
        // Only the two 9-item weeks are in the window.
        assert_eq!(report.velocity_items, 9.0);
        // Remaining still accounts for all completed work: 50 - 22.
        assert_eq!(report.remaining_items, 28.0);
    }

    #[test]
    fn test_deadline_feeds_schedule_dimensions() {
        let records = weekly_records(&[7.0, 7.0, 7.0, 7.0], &[0.0; 4]);
        let far_deadline = AnalysisSettings {
            estimated_total_items: Some(42.0),
            deadline: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
            ..AnalysisSettings::default()
        };
        let near_deadline = AnalysisSettings {
            estimated_total_items: Some(42.0),
            deadline: chrono::NaiveDate::from_ymd_opt(2024, 2, 1),
            ..AnalysisSettings::default()
        };
        let relaxed = AnalyticsEngine::new(far_deadline).analyze(&records);
        let squeezed = AnalyticsEngine::new(near_deadline).analyze(&records);
        assert!(
            relaxed.health.dimension_scores["delivery"]
                > squeezed.health.dimension_scores["delivery"]
        );
    }

    #[test]
    fn test_no_totals_means_no_remaining_work() {
        let records = weekly_records(&[5.0, 5.0], &[0.0, 0.0]);
        let report = AnalyticsEngine::default().analyze(&records);
        assert_eq!(report.remaining_items, 0.0);
        assert_eq!(report.estimate, sprintlens_core::RateEstimate::zero());
        // Baseline still reflects completed work in the window.
        assert_eq!(report.baseline.baseline_items, 10.0);
    }
}
