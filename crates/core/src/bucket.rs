//! Weekly aggregation buckets.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::record::Metric;

/// One row per distinct ISO (year, week), with duplicate raw rows summed.
///
/// Invariants maintained by the aggregator: `start_date` is the Monday of
/// the ISO week, and bucket sequences are sorted ascending by
/// `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Label in `"YYYY-Wnn"` form
    pub week_label: String,

    /// Monday of the ISO week
    pub start_date: NaiveDate,

    /// Sum of items completed in the week
    pub completed_items: f64,

    /// Sum of points completed in the week
    pub completed_points: f64,

    /// Sum of items created in the week
    pub created_items: f64,

    /// Sum of points created in the week
    pub created_points: f64,
}

impl WeeklyBucket {
    /// Create an empty bucket for the ISO week containing `date`.
    pub fn for_week_of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        let monday = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
            .unwrap_or(date);
        Self {
            week_label: format!("{}-W{:02}", iso.year(), iso.week()),
            start_date: monday,
            completed_items: 0.0,
            completed_points: 0.0,
            created_items: 0.0,
            created_points: 0.0,
        }
    }

    /// Read one of the four summed columns.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::CompletedItems => self.completed_items,
            Metric::CompletedPoints => self.completed_points,
            Metric::CreatedItems => self.created_items,
            Metric::CreatedPoints => self.created_points,
        }
    }

    /// Net scope growth (created minus completed) for items.
    pub fn items_growth(&self) -> f64 {
        self.created_items - self.completed_items
    }

    /// Net scope growth (created minus completed) for points.
    pub fn points_growth(&self) -> f64 {
        self.created_points - self.completed_points
    }
}
