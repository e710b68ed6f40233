//! Velocity over distinct active weeks.

use sprintlens_core::{EngineError, Metric, WeeklyBucket};

use crate::stats::round1;

/// Items or points per week, counting distinct weeks with data.
///
/// The divisor is the number of weekly buckets present, never the
/// calendar span between first and last date: two observations nine
/// calendar weeks apart still represent two weeks of actual work, and
/// dividing by the date range would silently deflate the rate. Rounded to
/// one decimal; 0.0 for empty input.
pub fn velocity(buckets: &[WeeklyBucket], metric: Metric) -> f64 {
    if buckets.is_empty() {
        return 0.0;
    }
    let total: f64 = buckets.iter().map(|b| b.metric(metric)).sum();
    round1(total / buckets.len().max(1) as f64)
}

/// String-keyed variant for callers holding raw column names.
///
/// Fails with [`EngineError::UnknownMetric`] when the named column is not
/// one the observation rows carry.
pub fn velocity_by_name(buckets: &[WeeklyBucket], column: &str) -> Result<f64, EngineError> {
    Ok(velocity(buckets, column.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_weekly;
    use sprintlens_core::RawObservation;

    fn completed(date: &str, items: f64) -> RawObservation {
        RawObservation::new(date, items, 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_velocity_empty_input() {
        assert_eq!(velocity(&[], Metric::CompletedItems), 0.0);
    }

    #[test]
    fn test_velocity_counts_active_weeks_not_calendar_span() {
        // Two observations nine calendar weeks apart, 10 items each.
        // Correct velocity is 20 / 2 = 10.0, not 20 / 9.
        let records = vec![completed("2024-01-01", 10.0), completed("2024-03-04", 10.0)];
        let buckets = aggregate_weekly(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(velocity(&buckets, Metric::CompletedItems), 10.0);
    }

    #[test]
    fn test_velocity_rounds_to_one_decimal() {
        let records = vec![
            completed("2024-03-04", 1.0),
            completed("2024-03-11", 1.0),
            completed("2024-03-18", 2.0),
        ];
        let buckets = aggregate_weekly(&records);
        // 4 / 3 = 1.333...
        assert_eq!(velocity(&buckets, Metric::CompletedItems), 1.3);
    }

    #[test]
    fn test_velocity_by_name_known_column() {
        let buckets = aggregate_weekly(&[completed("2024-03-04", 6.0)]);
        assert_eq!(velocity_by_name(&buckets, "completed_items").unwrap(), 6.0);
    }

    #[test]
    fn test_velocity_by_name_missing_column() {
        let buckets = aggregate_weekly(&[completed("2024-03-04", 6.0)]);
        let err = velocity_by_name(&buckets, "story_count").unwrap_err();
        assert!(matches!(err, EngineError::UnknownMetric(_)));
    }
}
