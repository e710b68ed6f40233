//! Three-point (PERT) rate estimates.

use serde::{Deserialize, Serialize};

/// Minimum daily rate. Rates are floored here before any time division so
/// that a stalled project yields an infinite time estimate instead of a
/// division-by-zero.
pub const RATE_FLOOR: f64 = 0.001;

/// Optimistic / most-likely / pessimistic daily rates and the resulting
/// PERT-weighted completion-time estimates.
///
/// Computed from weekly buckets only, never from raw rows. All rates are
/// at least [`RATE_FLOOR`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateEstimate {
    /// Best observed daily items rate
    pub optimistic_items_rate: f64,

    /// Mean daily items rate
    pub most_likely_items_rate: f64,

    /// Worst observed daily items rate
    pub pessimistic_items_rate: f64,

    /// Best observed daily points rate
    pub optimistic_points_rate: f64,

    /// Mean daily points rate
    pub most_likely_points_rate: f64,

    /// Worst observed daily points rate
    pub pessimistic_points_rate: f64,

    /// PERT time to complete remaining items, in days
    pub pert_time_items_days: f64,

    /// PERT time to complete remaining points, in days
    pub pert_time_points_days: f64,
}

impl RateEstimate {
    /// The all-zero estimate used when there is no usable data.
    pub fn zero() -> Self {
        Self::default()
    }
}
