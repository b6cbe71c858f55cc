//! Joint-angle metric definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named joint-angle metric derived from a frame's landmarks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    /// Hip-knee-ankle, averaged across both legs
    Knee,
    /// Shoulder-elbow-wrist, averaged across both arms
    Elbow,
    /// Ear-shoulder-hip, averaged across both sides
    Back,
    /// Shoulder-hip-ankle body line, averaged across both sides
    Body,
    /// Hip-knee-ankle of the raised/forward leg only
    FrontKnee,
    /// Alias of the elbow metric used by arm-focused poses
    Arms,
    /// Shoulder-hip-knee, left side preferred
    Hip,
}

impl MetricName {
    /// All metric names.
    pub const ALL: &'static [MetricName] = &[
        MetricName::Knee,
        MetricName::Elbow,
        MetricName::Back,
        MetricName::Body,
        MetricName::FrontKnee,
        MetricName::Arms,
        MetricName::Hip,
    ];

    /// Returns the metric name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Knee => "knee",
            MetricName::Elbow => "elbow",
            MetricName::Back => "back",
            MetricName::Body => "body",
            MetricName::FrontKnee => "front_knee",
            MetricName::Arms => "arms",
            MetricName::Hip => "hip",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = MetricNameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "knee" => Ok(MetricName::Knee),
            "elbow" => Ok(MetricName::Elbow),
            "back" => Ok(MetricName::Back),
            "body" => Ok(MetricName::Body),
            "front_knee" | "frontknee" => Ok(MetricName::FrontKnee),
            "arms" => Ok(MetricName::Arms),
            "hip" => Ok(MetricName::Hip),
            _ => Err(MetricNameParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown metric name: {0}")]
pub struct MetricNameParseError(String);

/// Ideal angle and tolerance for one metric, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricTarget {
    pub metric: MetricName,
    /// Angle at which the metric scores 1.0
    pub ideal: f64,
    /// Deviation at which the metric score reaches 0.0
    pub tolerance: f64,
}

impl MetricTarget {
    pub const fn new(metric: MetricName, ideal: f64, tolerance: f64) -> Self {
        Self {
            metric,
            ideal,
            tolerance,
        }
    }

    /// Check whether `value` lies within `bound` degrees of the ideal.
    pub fn within(&self, value: f64, bound: f64) -> bool {
        (value - self.ideal).abs() <= bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parse_roundtrip() {
        for metric in MetricName::ALL {
            assert_eq!(metric.as_str().parse::<MetricName>().unwrap(), *metric);
        }
        assert_eq!(" Front_Knee ".parse::<MetricName>().unwrap(), MetricName::FrontKnee);
        assert!("wrist".parse::<MetricName>().is_err());
    }

    #[test]
    fn test_metric_serializes_snake_case() {
        let json = serde_json::to_string(&MetricName::FrontKnee).unwrap();
        assert_eq!(json, "\"front_knee\"");
    }

    #[test]
    fn test_target_within() {
        let target = MetricTarget::new(MetricName::Knee, 90.0, 28.0);
        assert!(target.within(118.0, 28.0));
        assert!(!target.within(118.5, 28.0));
        assert!(target.within(76.0, 14.0));
    }
}
