//! Weekly aggregation of arbitrary-cadence observation rows.

use std::collections::BTreeMap;

use chrono::Datelike;
use sprintlens_core::{parse_observation_date, Observation, RawObservation, WeeklyBucket};
use tracing::warn;

/// Group raw rows into one bucket per distinct ISO (year, week).
///
/// Rows with unparseable dates are dropped; numeric junk has already been
/// coerced to zero during deserialization. Duplicate rows within a week
/// are summed. The result is sorted ascending by `start_date`, and an
/// empty input yields an empty output, never an error.
pub fn aggregate_weekly(records: &[RawObservation]) -> Vec<WeeklyBucket> {
    let mut parsed: Vec<Observation> = records
        .iter()
        .filter_map(|row| match parse_observation_date(&row.date) {
            Ok(date) => Some(Observation {
                date,
                completed_items: row.completed_items,
                completed_points: row.completed_points,
                created_items: row.created_items,
                created_points: row.created_points,
            }),
            Err(_) => {
                warn!(date = %row.date, "dropping observation row with unparseable date");
                None
            }
        })
        .collect();

    parsed.sort_by_key(|obs| obs.date);

    // BTreeMap keyed by (ISO year, ISO week) keeps buckets in start_date
    // order for free.
    let mut groups: BTreeMap<(i32, u32), WeeklyBucket> = BTreeMap::new();
    for obs in parsed {
        let iso = obs.date.iso_week();
        let bucket = groups
            .entry((iso.year(), iso.week()))
            .or_insert_with(|| WeeklyBucket::for_week_of(obs.date));
        bucket.completed_items += obs.completed_items;
        bucket.completed_points += obs.completed_points;
        bucket.created_items += obs.created_items;
        bucket.created_points += obs.created_points;
    }

    groups.into_values().collect()
}

/// Keep only the most recent `weeks` buckets.
///
/// This is the window-filtering contract: the parameter counts ISO weekly
/// buckets, never raw rows, so filtering stays correct under irregular
/// reporting cadence.
pub fn recent_weeks(buckets: &[WeeklyBucket], weeks: usize) -> Vec<WeeklyBucket> {
    let skip = buckets.len().saturating_sub(weeks);
    buckets[skip..].to_vec()
}
