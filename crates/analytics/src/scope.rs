//! Scope baseline, creep, stability, and weekly growth.

use sprintlens_core::{
    Metric, ScopeBaseline, ScopeCreepRate, ScopeStability, WeeklyBucket, WeeklyGrowth,
};

use crate::stats::{round1, round2};

/// Scope at the start of the analysis window: current remaining plus
/// completed-in-window.
///
/// Created-in-window work is growth relative to this baseline and is
/// deliberately excluded; adding it would hide the very creep these
/// metrics measure.
pub fn baseline(
    buckets: &[WeeklyBucket],
    current_remaining_items: f64,
    current_remaining_points: f64,
) -> ScopeBaseline {
    ScopeBaseline {
        baseline_items: current_remaining_items + column_sum(buckets, Metric::CompletedItems),
        baseline_points: current_remaining_points + column_sum(buckets, Metric::CompletedPoints),
    }
}

/// Created work as a percentage of the baseline, rounded to one decimal.
/// Zero baseline yields a zero rate rather than a division error.
pub fn scope_creep_rate(buckets: &[WeeklyBucket], baseline: &ScopeBaseline) -> ScopeCreepRate {
    ScopeCreepRate {
        items_rate: creep(column_sum(buckets, Metric::CreatedItems), baseline.baseline_items),
        points_rate: creep(
            column_sum(buckets, Metric::CreatedPoints),
            baseline.baseline_points,
        ),
    }
}

/// `1 - created / current_total`, bounded to `[0, 1]` and rounded to two
/// decimals. Empty input or a zero baseline reads as perfectly stable:
/// no created work was observed against anything.
pub fn scope_stability_index(
    buckets: &[WeeklyBucket],
    baseline: &ScopeBaseline,
) -> ScopeStability {
    if buckets.is_empty() {
        return ScopeStability::default();
    }
    ScopeStability {
        items_stability: stability(
            column_sum(buckets, Metric::CreatedItems),
            baseline.baseline_items,
        ),
        points_stability: stability(
            column_sum(buckets, Metric::CreatedPoints),
            baseline.baseline_points,
        ),
    }
}

/// Per-week net scope growth, `created - completed`, in bucket order.
///
/// Callers reconstruct a remaining-work curve as
/// `baseline + cumulative_net_growth`; with the baseline computed above
/// that curve never goes negative.
pub fn weekly_scope_growth(buckets: &[WeeklyBucket]) -> Vec<WeeklyGrowth> {
    buckets
        .iter()
        .map(|bucket| WeeklyGrowth {
            week_label: bucket.week_label.clone(),
            start_date: bucket.start_date,
            items_growth: bucket.items_growth(),
            points_growth: bucket.points_growth(),
        })
        .collect()
}

fn column_sum(buckets: &[WeeklyBucket], metric: Metric) -> f64 {
    buckets.iter().map(|b| b.metric(metric)).sum()
}

fn creep(created: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    round1(created / baseline * 100.0)
}

fn stability(created: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 1.0;
    }
    let current_total = baseline + created;
    if current_total == 0.0 {
        return 1.0;
    }
    round2((1.0 - created / current_total).clamp(0.0, 1.0))
}
