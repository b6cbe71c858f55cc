//! Shared data models for the FormCheck session analytics engine.
//!
//! This crate provides Serde-serializable types for:
//! - Body landmarks and recorded sessions (engine input)
//! - Activities and their scoring/segmentation rules
//! - Quality tiers
//! - Per-frame, per-rep and aggregate reports (engine output)

pub mod activity;
pub mod landmark;
pub mod metric;
pub mod quality;
pub mod report;
pub mod rule;
pub mod session;

// Re-export common types
pub use activity::{resolve_rule, Activity, ActivityParseError, ACTIVITY_ALIASES};
pub use landmark::{landmark_at, LandmarkPoint, PoseLandmark, POSE_LANDMARK_COUNT};
pub use metric::{MetricName, MetricNameParseError, MetricTarget};
pub use quality::{CategoryCounts, QualityCategory};
pub use report::{AnalyticsPoint, AnalyticsResult, ChartPoint, HoldSummary, Rep};
pub use rule::{Polarity, Rule, SegmentationMode};
pub use session::{Frame, Session};
