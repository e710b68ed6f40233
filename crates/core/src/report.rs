//! Combined output of one analytics request.

use serde::{Deserialize, Serialize};

use crate::bucket::WeeklyBucket;
use crate::estimate::RateEstimate;
use crate::forecast::ForecastBundle;
use crate::health::HealthScore;
use crate::scope::{ScopeBaseline, ScopeCreepRate, ScopeStability, WeeklyGrowth};
use crate::trend::TrendAnalysis;

/// Everything a dashboard needs from one pass over the observation rows.
///
/// All fields are plain numeric/date structures consumable by a charting
/// layer without further engine calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The aggregated (and window-filtered) weekly buckets
    pub buckets: Vec<WeeklyBucket>,

    /// Items completed per active week
    pub velocity_items: f64,

    /// Points completed per active week
    pub velocity_points: f64,

    /// Items left to complete against the estimated total
    pub remaining_items: f64,

    /// Points left to complete against the estimated total
    pub remaining_points: f64,

    /// Three-point rate and time estimate
    pub estimate: RateEstimate,

    /// Remaining-work forecast lines (items)
    pub burndown: ForecastBundle,

    /// Completed-work forecast lines (items)
    pub burnup: ForecastBundle,

    /// Scope at the start of the analysis window
    pub baseline: ScopeBaseline,

    /// Created work relative to baseline
    pub scope_creep: ScopeCreepRate,

    /// Backlog stability index
    pub scope_stability: ScopeStability,

    /// Per-week net scope growth
    pub weekly_growth: Vec<WeeklyGrowth>,

    /// Velocity trend over the recent weeks
    pub trend: TrendAnalysis,

    /// Composite health score
    pub health: HealthScore,
}
