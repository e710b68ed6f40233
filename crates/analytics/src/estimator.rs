//! Three-point (PERT) rate and completion-time estimation.

use sprintlens_core::{Metric, RateEstimate, WeeklyBucket, RATE_FLOOR};
use tracing::debug;

use crate::stats::mean;

/// Weekly buckets needed before best/worst weeks are distinguishable from
/// the mean.
const MIN_WEEKS_FOR_SPREAD: usize = 3;

/// Derive optimistic / most-likely / pessimistic daily rates and PERT
/// completion times from weekly buckets.
///
/// `pert_factor` selects how many best/worst weeks feed the extremes; it
/// is clamped to `max(1, min(pert_factor, len / 3))`. With fewer than
/// three buckets all three rates collapse to the simple mean. Empty
/// buckets or no remaining work yield the all-zero estimate, never an
/// error, and negative or zero observations are tolerated via the rate
/// floor.
pub fn estimate_rates(
    buckets: &[WeeklyBucket],
    remaining_items: f64,
    remaining_points: f64,
    pert_factor: f64,
) -> RateEstimate {
    if buckets.is_empty() || (remaining_items <= 0.0 && remaining_points <= 0.0) {
        return RateEstimate::zero();
    }

    let factor = valid_factor(pert_factor, buckets.len());
    debug!(
        weeks = buckets.len(),
        factor, "estimating rates from weekly buckets"
    );

    let (optimistic_items, most_likely_items, pessimistic_items) =
        column_rates(buckets, Metric::CompletedItems, factor);
    let (optimistic_points, most_likely_points, pessimistic_points) =
        column_rates(buckets, Metric::CompletedPoints, factor);

    RateEstimate {
        optimistic_items_rate: optimistic_items,
        most_likely_items_rate: most_likely_items,
        pessimistic_items_rate: pessimistic_items,
        optimistic_points_rate: optimistic_points,
        most_likely_points_rate: most_likely_points,
        pessimistic_points_rate: pessimistic_points,
        pert_time_items_days: pert_time(
            remaining_items,
            optimistic_items,
            most_likely_items,
            pessimistic_items,
        ),
        pert_time_points_days: pert_time(
            remaining_points,
            optimistic_points,
            most_likely_points,
            pessimistic_points,
        ),
    }
}

/// Clamp the requested selection width against the dataset size.
fn valid_factor(pert_factor: f64, weeks: usize) -> usize {
    let requested = pert_factor.max(0.0) as usize;
    requested.min(weeks / MIN_WEEKS_FOR_SPREAD).max(1)
}

/// (optimistic, most-likely, pessimistic) daily rates for one column.
fn column_rates(buckets: &[WeeklyBucket], metric: Metric, factor: usize) -> (f64, f64, f64) {
    let mut sums: Vec<f64> = buckets.iter().map(|b| b.metric(metric)).collect();
    let most_likely = floor_rate(mean(&sums) / 7.0);

    if sums.len() < MIN_WEEKS_FOR_SPREAD {
        // Too little data to tell extremes apart from the mean.
        return (most_likely, most_likely, most_likely);
    }

    sums.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pessimistic = floor_rate(mean(&sums[..factor]) / 7.0);
    let optimistic = floor_rate(mean(&sums[sums.len() - factor..]) / 7.0);
    (optimistic, most_likely, pessimistic)
}

fn floor_rate(rate: f64) -> f64 {
    rate.max(RATE_FLOOR)
}

/// Days to finish `remaining` at `rate`; infinite when the rate sits at
/// the floor, zero when nothing remains.
fn time_for(remaining: f64, rate: f64) -> f64 {
    if remaining <= 0.0 {
        0.0
    } else if rate > RATE_FLOOR {
        remaining / rate
    } else {
        f64::INFINITY
    }
}

/// `(O + 4M + P) / 6` over the per-scenario completion times.
fn pert_time(remaining: f64, optimistic: f64, most_likely: f64, pessimistic: f64) -> f64 {
    if remaining <= 0.0 {
        return 0.0;
    }
    let best = time_for(remaining, optimistic);
    let likely = time_for(remaining, most_likely);
    let worst = time_for(remaining, pessimistic);
    (best + 4.0 * likely + worst) / 6.0
}
