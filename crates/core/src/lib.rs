//! sprintlens core data models.
//!
//! This crate defines the data structures exchanged between the
//! forecasting/health analytics engine and its callers: raw observation
//! rows, weekly aggregates, rate estimates, forecast series, scope
//! metrics, trend classifications, and health scores.

#![warn(missing_docs)]

// Input rows and columns
mod record;

// Weekly aggregation
mod bucket;

// Estimation and forecasting
mod estimate;
mod forecast;

// Scope, trend, and health
mod scope;
mod trend;
mod health;

// Caller-supplied configuration and combined output
mod settings;
mod report;

mod error;

// Re-exports
pub use record::{Metric, Observation, RawObservation, parse_observation_date};
pub use bucket::WeeklyBucket;
pub use estimate::{RateEstimate, RATE_FLOOR};
pub use forecast::{
    ForecastBundle, ForecastPoint, ForecastSeries, MAX_FORECAST_DAYS, MAX_FORECAST_POINTS,
};
pub use scope::{ScopeBaseline, ScopeCreepRate, ScopeStability, WeeklyGrowth};
pub use trend::{TrendAnalysis, TrendDirection};
pub use health::{Dimension, ExternalMetrics, HealthScore, HealthStatus};
pub use settings::AnalysisSettings;
pub use report::AnalysisReport;
pub use error::EngineError;
