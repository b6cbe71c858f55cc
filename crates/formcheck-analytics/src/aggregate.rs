//! Folding per-frame and per-rep results into the session report.

use formcheck_models::{
    Activity, AnalyticsPoint, AnalyticsResult, CategoryCounts, ChartPoint, HoldSummary, Rep, Rule,
    Session,
};

use crate::smoothing::mean_with_missing_as_zero;

/// round(100 × mean frame score), unscored frames counted as 0.
pub fn weighted_score(timeline: &[AnalyticsPoint]) -> u32 {
    let scores: Vec<Option<f64>> = timeline.iter().map(|p| p.score).collect();
    let pct = (100.0 * mean_with_missing_as_zero(&scores)).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Every `stride`-th timeline point reduced to chart values.
pub fn downsample(timeline: &[AnalyticsPoint], rule: &Rule, stride: usize) -> Vec<ChartPoint> {
    let secondary = rule.secondary_metric();

    timeline
        .iter()
        .step_by(stride.max(1))
        .map(|point| ChartPoint {
            time_sec: (point.t as f64 / 1000.0).round() as u64,
            primary_value: point.metric(rule.primary_metric),
            secondary_value: secondary.and_then(|m| point.metric(m)),
            passed: point.passed,
            score: point.score,
            category: point.category,
        })
        .collect()
}

/// Time spent holding the pose correctly.
pub fn hold_summary(timeline: &[AnalyticsPoint]) -> HoldSummary {
    let (Some(first), Some(last)) = (timeline.first(), timeline.last()) else {
        return HoldSummary::default();
    };

    let mut passed_duration_ms = 0u64;
    for pair in timeline.windows(2) {
        if pair[0].passed {
            passed_duration_ms += pair[1].t.saturating_sub(pair[0].t);
        }
    }

    let mut longest_passed_streak_ms = 0u64;
    let mut streak_start: Option<u64> = None;
    for point in timeline {
        if point.passed {
            let start = *streak_start.get_or_insert(point.t);
            longest_passed_streak_ms = longest_passed_streak_ms.max(point.t.saturating_sub(start));
        } else {
            streak_start = None;
        }
    }

    HoldSummary {
        duration_ms: last.t.saturating_sub(first.t),
        passed_duration_ms,
        longest_passed_streak_ms,
    }
}

/// Assemble the final report.
pub fn aggregate(
    session: &Session,
    activity: Activity,
    rule: &Rule,
    timeline: Vec<AnalyticsPoint>,
    reps: Vec<Rep>,
    sample_stride: usize,
) -> AnalyticsResult {
    let correct_frames = timeline.iter().filter(|p| p.passed).count();
    let overall_weighted_score = weighted_score(&timeline);

    let good_rep_count = reps.iter().filter(|r| r.is_good).count();
    let bad_rep_count = reps.len() - good_rep_count;

    let frame_category_counts: CategoryCounts = timeline.iter().map(|p| p.category).collect();
    let rep_category_counts: CategoryCounts = reps.iter().map(|r| r.category).collect();

    let downsampled_series = downsample(&timeline, rule, sample_stride);
    let hold = rule.is_hold().then(|| hold_summary(&timeline));

    AnalyticsResult {
        activity,
        primary_metric: rule.primary_metric,
        recorded_at: session.recorded_at,
        duration_ms: session.duration_ms(),
        total_frames: session.frames.len(),
        correct_frames,
        accuracy_pct: overall_weighted_score,
        overall_weighted_score,
        timeline,
        reps,
        good_rep_count,
        bad_rep_count,
        frame_category_counts,
        rep_category_counts,
        downsampled_series,
        hold,
    }
}
