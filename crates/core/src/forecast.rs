//! Forecast series produced by the projector.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hard cap on the projection horizon, in days.
pub const MAX_FORECAST_DAYS: i64 = 730;

/// Maximum number of sampled points per series, excluding the closing
/// point.
pub const MAX_FORECAST_POINTS: i64 = 100;

/// A single `(date, value)` sample on a forecast line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar date of the sample
    pub date: NaiveDate,
    /// Remaining (burndown) or completed (burnup) work at that date
    pub value: f64,
}

/// An ordered, finite forecast line.
///
/// Series are capped at [`MAX_FORECAST_DAYS`] of horizon and
/// [`MAX_FORECAST_POINTS`] samples plus one closing point, and
/// monotonically approach zero (burndown) or the scope ceiling (burnup).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// Sampled points, ascending by date
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// Number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series carries no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First date on the line, if any.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last date on the line, if any.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Average / optimistic / pessimistic lines for one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// Line derived from the most-likely rate
    pub average: ForecastSeries,
    /// Line derived from the optimistic rate
    pub optimistic: ForecastSeries,
    /// Line derived from the pessimistic rate
    pub pessimistic: ForecastSeries,
}
