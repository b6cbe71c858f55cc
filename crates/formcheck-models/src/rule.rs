//! Scoring and segmentation rules.
//!
//! A [`Rule`] is resolved once per analysis from the activity registry
//! (see [`crate::Activity::rule`]) and never mutated afterwards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metric::{MetricName, MetricTarget};

/// Which extremum of the primary metric marks the working point of a rep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Rep depth is a local minimum (squat, push-up)
    Valley,
    /// Rep depth is a local maximum (glute bridge)
    Peak,
}

impl Polarity {
    /// The extremum kind that bounds a rep of this polarity.
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Valley => Polarity::Peak,
            Polarity::Peak => Polarity::Valley,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Valley => "valley",
            Polarity::Peak => "peak",
        }
    }
}

/// How a session of this activity is split into units of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Count repetitions between extrema of the primary metric.
    Segmented {
        /// Minimum span, in frames, of a valid rep window
        #[serde(rename = "minFrames")]
        min_frames: usize,
        polarity: Polarity,
    },
    /// Static pose or isometric hold evaluated as one interval.
    Continuous,
}

/// Activity-specific configuration for scoring and segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Metric whose series drives rep segmentation
    pub primary_metric: MetricName,

    /// Scored metrics in declaration order
    pub metrics: Vec<MetricTarget>,

    /// Mean frame score a rep needs to count as good when it reaches full depth
    pub correct_ratio_threshold: f64,

    /// Frame score at or above which a frame is marked as passed
    pub frame_pass_threshold: f64,

    pub segmentation: SegmentationMode,
}

impl Rule {
    /// Look up the target for a metric.
    pub fn target(&self, metric: MetricName) -> Option<&MetricTarget> {
        self.metrics.iter().find(|t| t.metric == metric)
    }

    /// Target of the primary metric.
    ///
    /// Registry rules always list their primary metric; a hand-built rule that
    /// does not gets a zero-tolerance target at 0 degrees.
    pub fn primary_target(&self) -> MetricTarget {
        self.target(self.primary_metric)
            .copied()
            .unwrap_or(MetricTarget::new(self.primary_metric, 0.0, 0.0))
    }

    /// First scored metric other than the primary one.
    pub fn secondary_metric(&self) -> Option<MetricName> {
        self.metrics
            .iter()
            .map(|t| t.metric)
            .find(|m| *m != self.primary_metric)
    }

    /// Minimum rep span in frames; `None` means unbounded (hold mode).
    pub fn min_frames_for_rep(&self) -> Option<usize> {
        match self.segmentation {
            SegmentationMode::Segmented { min_frames, .. } => Some(min_frames),
            SegmentationMode::Continuous => None,
        }
    }

    /// Rep polarity; `None` disables segmentation.
    pub fn polarity(&self) -> Option<Polarity> {
        match self.segmentation {
            SegmentationMode::Segmented { polarity, .. } => Some(polarity),
            SegmentationMode::Continuous => None,
        }
    }

    /// Returns true if the activity is evaluated as a continuous hold.
    pub fn is_hold(&self) -> bool {
        matches!(self.segmentation, SegmentationMode::Continuous)
    }

    /// Score a rep needs when it only reaches the softer depth bound.
    pub fn soft_threshold(&self) -> f64 {
        (self.correct_ratio_threshold - 0.18).max(0.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squat_like() -> Rule {
        Rule {
            primary_metric: MetricName::Knee,
            metrics: vec![
                MetricTarget::new(MetricName::Knee, 90.0, 28.0),
                MetricTarget::new(MetricName::Back, 165.0, 25.0),
            ],
            correct_ratio_threshold: 0.6,
            frame_pass_threshold: 0.6,
            segmentation: SegmentationMode::Segmented {
                min_frames: 6,
                polarity: Polarity::Valley,
            },
        }
    }

    #[test]
    fn test_segmentation_accessors() {
        let rule = squat_like();
        assert_eq!(rule.min_frames_for_rep(), Some(6));
        assert_eq!(rule.polarity(), Some(Polarity::Valley));
        assert!(!rule.is_hold());

        let hold = Rule {
            segmentation: SegmentationMode::Continuous,
            ..squat_like()
        };
        assert_eq!(hold.min_frames_for_rep(), None);
        assert_eq!(hold.polarity(), None);
        assert!(hold.is_hold());
    }

    #[test]
    fn test_primary_and_secondary() {
        let rule = squat_like();
        assert_eq!(rule.primary_target().ideal, 90.0);
        assert_eq!(rule.secondary_metric(), Some(MetricName::Back));
    }

    #[test]
    fn test_soft_threshold_floor() {
        let mut rule = squat_like();
        assert!((rule.soft_threshold() - 0.42).abs() < 1e-9);

        rule.correct_ratio_threshold = 0.5;
        assert!((rule.soft_threshold() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_segmentation_json() {
        let json = serde_json::to_value(squat_like().segmentation).unwrap();
        assert_eq!(json["mode"], "segmented");
        assert_eq!(json["minFrames"], 6);
        assert_eq!(json["polarity"], "valley");

        let hold = serde_json::to_value(SegmentationMode::Continuous).unwrap();
        assert_eq!(hold["mode"], "continuous");
    }
}
