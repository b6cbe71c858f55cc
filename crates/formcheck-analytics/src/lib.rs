#![deny(unreachable_patterns)]
//! Batch analytics for recorded body-landmark sessions.
//!
//! This crate provides:
//! - Joint-angle extraction from pose landmarks, with bilateral averaging
//! - Per-frame scoring against the activity's rule
//! - Smoothing, extremum detection and rep segmentation of the primary metric
//! - Session aggregation into an [`AnalyticsResult`](formcheck_models::AnalyticsResult)
//! - Parallel batch analysis and `metrics` instrumentation

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod extrema;
pub mod geometry;
pub mod joint_metrics;
pub mod observability;
pub mod scoring;
pub mod segmenter;
pub mod smoothing;


pub use aggregate::{aggregate, downsample, hold_summary, weighted_score};
pub use config::{AnalyzeOptions, MAX_SMOOTHING_RADIUS};
pub use engine::{analyze, analyze_batch, analyze_json};
pub use error::{EngineError, EngineResult};
pub use extrema::{find_extrema, Extrema};
pub use geometry::joint_angle;
pub use joint_metrics::{extract_metrics, extract_selected, metric_value};
pub use scoring::{categorize, error_factor, metric_score, score_frame, FrameScore};
pub use segmenter::{RepSegmenter, SegmentInput};
pub use smoothing::smooth;
