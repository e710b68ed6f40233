//! Bounded, sampled burndown/burnup projection.

use chrono::{Duration, NaiveDate};
use sprintlens_core::{
    ForecastBundle, ForecastPoint, ForecastSeries, RateEstimate, MAX_FORECAST_DAYS,
    MAX_FORECAST_POINTS, RATE_FLOOR,
};
use tracing::debug;

/// Walk a daily rate forward from the current state.
///
/// `target = None` projects a burndown: `start_value` shrinks to zero.
/// `target = Some(ceiling)` projects a burnup: `start_value` grows to the
/// ceiling. The horizon is capped at [`MAX_FORECAST_DAYS`] and the series
/// at [`MAX_FORECAST_POINTS`] samples plus a closing point placed exactly
/// on the goal value. A near-zero rate yields a short, valid series
/// rather than an unbounded walk.
pub fn project(
    start_value: f64,
    daily_rate: f64,
    start_date: NaiveDate,
    target: Option<f64>,
) -> ForecastSeries {
    let days = days_to_goal(distance_to_goal(start_value, target), daily_rate);
    sample(start_value, daily_rate, start_date, target, days)
}

/// Companion burndown and burnup lines from the same rate.
///
/// The burnup horizon (to the full scope ceiling) is computed first and
/// the burndown line is forced to terminate on the same calendar date, so
/// the two render as visually consistent companions.
pub fn project_companions(
    remaining: f64,
    completed: f64,
    total_scope: f64,
    daily_rate: f64,
    start_date: NaiveDate,
) -> (ForecastSeries, ForecastSeries) {
    let horizon = days_to_goal((total_scope - completed).max(0.0), daily_rate);
    let burnup = sample(completed, daily_rate, start_date, Some(total_scope), horizon);
    let burndown = sample(remaining, daily_rate, start_date, None, horizon);
    (burndown, burnup)
}

/// Average/optimistic/pessimistic bundles for the items charts.
pub fn forecast_bundles(
    remaining: f64,
    completed: f64,
    total_scope: f64,
    estimate: &RateEstimate,
    start_date: NaiveDate,
) -> (ForecastBundle, ForecastBundle) {
    debug!(remaining, completed, total_scope, "building forecast bundles");
    let (down_avg, up_avg) = project_companions(
        remaining,
        completed,
        total_scope,
        estimate.most_likely_items_rate,
        start_date,
    );
    let (down_best, up_best) = project_companions(
        remaining,
        completed,
        total_scope,
        estimate.optimistic_items_rate,
        start_date,
    );
    let (down_worst, up_worst) = project_companions(
        remaining,
        completed,
        total_scope,
        estimate.pessimistic_items_rate,
        start_date,
    );
    (
        ForecastBundle {
            average: down_avg,
            optimistic: down_best,
            pessimistic: down_worst,
        },
        ForecastBundle {
            average: up_avg,
            optimistic: up_best,
            pessimistic: up_worst,
        },
    )
}

fn distance_to_goal(start_value: f64, target: Option<f64>) -> f64 {
    match target {
        Some(ceiling) => (ceiling - start_value).max(0.0),
        None => start_value.max(0.0),
    }
}

/// Raw days until the goal at the floored rate, clamped to the horizon
/// cap.
fn days_to_goal(distance: f64, daily_rate: f64) -> i64 {
    if distance <= 0.0 {
        return 0;
    }
    let rate = daily_rate.max(RATE_FLOOR);
    ((distance / rate).ceil() as i64).clamp(1, MAX_FORECAST_DAYS)
}

/// Emit samples at an adaptive interval plus a closing point exactly on
/// the goal value.
fn sample(
    start_value: f64,
    daily_rate: f64,
    start_date: NaiveDate,
    target: Option<f64>,
    days: i64,
) -> ForecastSeries {
    let goal = target.unwrap_or(0.0);
    if days <= 0 {
        // Already at (or past) the goal.
        return ForecastSeries {
            points: vec![ForecastPoint {
                date: start_date,
                value: goal,
            }],
        };
    }

    let rate = daily_rate.max(RATE_FLOOR);
    // Ceiling division keeps the sampled count at or below the cap.
    let interval = ((days + MAX_FORECAST_POINTS - 1) / MAX_FORECAST_POINTS).max(1);

    let mut points = Vec::new();
    let mut day = 0;
    while day < days {
        let value = match target {
            None => (start_value - rate * day as f64).max(0.0),
            Some(ceiling) => (start_value + rate * day as f64).min(ceiling),
        };
        points.push(ForecastPoint {
            date: start_date + Duration::days(day),
            value,
        });
        day += interval;
    }
    points.push(ForecastPoint {
        date: start_date + Duration::days(days),
        value: goal,
    });

    ForecastSeries { points }
}
