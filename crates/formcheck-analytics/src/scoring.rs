//! Per-frame quality scoring against an activity rule.

use std::collections::BTreeMap;

use formcheck_models::{MetricName, MetricTarget, QualityCategory, Rule};

/// Score and classification of a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameScore {
    /// Mean metric score in [0, 1], `None` when no metric had a value
    pub score: Option<f64>,
    pub category: QualityCategory,
    pub passed: bool,
}

/// Normalized deviation from the ideal, in [0, 1].
///
/// A zero (or negative) tolerance demands an exact match.
pub fn error_factor(value: f64, target: &MetricTarget) -> f64 {
    if target.tolerance <= 0.0 {
        return if value == target.ideal { 0.0 } else { 1.0 };
    }
    ((value - target.ideal).abs() / target.tolerance).min(1.0)
}

/// Score of a single metric value, 1.0 at the ideal falling to 0.0 at the tolerance.
pub fn metric_score(value: f64, target: &MetricTarget) -> f64 {
    (1.0 - error_factor(value, target)).max(0.0)
}

/// Four-tier classification of a score.
pub fn categorize(score: Option<f64>) -> QualityCategory {
    QualityCategory::from_score(score)
}

/// Score one frame's metrics against the rule.
///
/// Metrics without a value are left out of the mean; a frame where no scored
/// metric has a value gets no score at all.
pub fn score_frame(metrics: &BTreeMap<MetricName, Option<f64>>, rule: &Rule) -> FrameScore {
    let scores: Vec<f64> = rule
        .metrics
        .iter()
        .filter_map(|target| {
            metrics
                .get(&target.metric)
                .copied()
                .flatten()
                .filter(|v| v.is_finite())
                .map(|v| metric_score(v, target))
        })
        .collect();

    let score = if scores.is_empty() {
        None
    } else {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Some(mean.clamp(0.0, 1.0))
    };

    FrameScore {
        score,
        category: categorize(score),
        passed: score.is_some_and(|s| s >= rule.frame_pass_threshold),
    }
}
