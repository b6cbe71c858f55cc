//! Analysis report models.
//!
//! These are the engine's output. They are built fresh for every analysis
//! and handed back to the caller; the engine never stores them.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::activity::Activity;
use crate::metric::MetricName;
use crate::quality::{CategoryCounts, QualityCategory};

/// Per-frame derived data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyticsPoint {
    /// Frame timestamp in milliseconds
    pub t: u64,

    /// Extracted angle per scored metric, `null` when not computable
    pub metrics: BTreeMap<MetricName, Option<f64>>,

    /// Frame quality score in [0, 1], `null` when no metric had a value
    pub score: Option<f64>,

    pub category: QualityCategory,

    /// Legacy pass flag: score at or above the rule's frame pass threshold
    pub passed: bool,
}

impl AnalyticsPoint {
    /// Value of a metric at this frame, if it was computable.
    pub fn metric(&self, metric: MetricName) -> Option<f64> {
        self.metrics.get(&metric).copied().flatten()
    }
}

/// One detected repetition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rep {
    /// Timestamp of the first frame of the window
    pub start_t: u64,
    /// Timestamp of the last frame of the window
    pub end_t: u64,
    /// `end_t - start_t`
    pub duration_ms: u64,
    /// Frame index of the window start
    pub start_index: usize,
    /// Frame index of the window end (inclusive)
    pub end_index: usize,
    /// Smallest smoothed primary-metric value inside the window
    pub min_value: f64,
    /// Largest smoothed primary-metric value inside the window
    pub max_value: f64,
    /// Mean frame score across the window, unscored frames counted as 0
    pub mean_frame_score: f64,
    pub category: QualityCategory,
    pub is_good: bool,
    /// Working extremum within the primary tolerance of the ideal
    pub meets_depth: bool,
    /// Working extremum within half the primary tolerance of the ideal
    pub close_depth: bool,
    /// Number of frames in the window
    pub frame_count: usize,
}

/// Down-sampled timeline point shaped for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Frame timestamp rounded to whole seconds
    pub time_sec: u64,
    pub primary_value: Option<f64>,
    pub secondary_value: Option<f64>,
    pub passed: bool,
    pub score: Option<f64>,
    pub category: QualityCategory,
}

/// Time-based summary of a continuous hold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldSummary {
    /// First to last frame
    pub duration_ms: u64,
    /// Sum of frame intervals that start on a passed frame
    pub passed_duration_ms: u64,
    /// Longest run of consecutive passed frames, first to last timestamp
    pub longest_passed_streak_ms: u64,
}

/// Aggregate analysis report for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    /// Activity the session identifier resolved to
    pub activity: Activity,
    pub primary_metric: MetricName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,

    /// First to last frame in milliseconds
    pub duration_ms: u64,

    pub total_frames: usize,
    /// Frames whose score reached the pass threshold
    pub correct_frames: usize,
    /// Same value as `overall_weighted_score`, kept for older consumers
    pub accuracy_pct: u32,
    /// round(100 x mean frame score), unscored frames counted as 0
    pub overall_weighted_score: u32,

    pub timeline: Vec<AnalyticsPoint>,

    pub reps: Vec<Rep>,
    pub good_rep_count: usize,
    pub bad_rep_count: usize,

    pub frame_category_counts: CategoryCounts,
    pub rep_category_counts: CategoryCounts,

    pub downsampled_series: Vec<ChartPoint>,

    /// Present for hold activities only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<HoldSummary>,
}

impl AnalyticsResult {
    /// Reps that passed classification.
    pub fn good_reps(&self) -> impl Iterator<Item = &Rep> {
        self.reps.iter().filter(|r| r.is_good)
    }

    /// Fraction of frames that passed (0.0 when there are none).
    pub fn pass_ratio(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        self.correct_frames as f64 / self.total_frames as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_metric_lookup() {
        let mut metrics = BTreeMap::new();
        metrics.insert(MetricName::Knee, Some(95.0));
        metrics.insert(MetricName::Back, None);

        let point = AnalyticsPoint {
            t: 0,
            metrics,
            score: Some(0.9),
            category: QualityCategory::Excellent,
            passed: true,
        };

        assert_eq!(point.metric(MetricName::Knee), Some(95.0));
        assert_eq!(point.metric(MetricName::Back), None);
        assert_eq!(point.metric(MetricName::Elbow), None);

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["metrics"]["knee"], 95.0);
        assert!(json["metrics"]["back"].is_null());
    }

    #[test]
    fn test_rep_json_fields() {
        let rep = Rep {
            start_t: 1_000,
            end_t: 2_500,
            duration_ms: 1_500,
            start_index: 30,
            end_index: 75,
            min_value: 88.0,
            max_value: 172.0,
            mean_frame_score: 0.8,
            category: QualityCategory::Good,
            is_good: true,
            meets_depth: true,
            close_depth: true,
            frame_count: 46,
        };
        let json = serde_json::to_value(&rep).unwrap();
        assert_eq!(json["startT"], 1_000);
        assert_eq!(json["durationMs"], 1_500);
        assert_eq!(json["isGood"], true);
        assert_eq!(json["category"], "Good");
    }
}
