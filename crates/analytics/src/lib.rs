//! Forecasting and project-health analytics engine.
//!
//! Pure transformations from observation rows to forecasts, scope
//! metrics, trends, and health scores:
//! - Weekly aggregation into ISO (year, week) buckets
//! - Velocity over distinct active weeks
//! - Three-point (PERT) rate estimation
//! - Bounded, sampled burndown/burnup projection
//! - Scope creep and stability metrics
//! - Trend classification and composite health scoring

#![warn(missing_docs)]

pub mod aggregate;
pub mod velocity;
pub mod estimator;
pub mod forecast;
pub mod scope;
pub mod trend;
pub mod health;
pub mod engine;

mod stats;

pub use aggregate::{aggregate_weekly, recent_weeks};
pub use velocity::{velocity, velocity_by_name};
pub use estimator::estimate_rates;
pub use forecast::{forecast_bundles, project, project_companions};
pub use scope::{baseline, scope_creep_rate, scope_stability_index, weekly_scope_growth};
pub use trend::TrendAnalyzer;
pub use health::{completion_confidence, schedule_variance_days, score, velocity_cv, HealthInputs};
pub use engine::AnalyticsEngine;
