//! Analysis options.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{EngineError, EngineResult};

/// Largest smoothing radius accepted, in frames.
pub const MAX_SMOOTHING_RADIUS: usize = 50;

/// Tunables for a single analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeOptions {
    /// Half-width of the moving-average window applied to the primary metric.
    ///
    /// - 0: no smoothing
    /// - Default (2): five-frame window, enough to suppress tracker jitter
    /// - Larger values flatten fast reps into each other
    #[validate(range(max = 50))]
    pub smoothing_radius: usize,

    /// Keep every n-th timeline point in the down-sampled chart series.
    #[validate(range(min = 1))]
    pub sample_stride: usize,

    /// Landmarks whose visibility is below this value are treated as missing.
    ///
    /// Points without a visibility value are never filtered. The default
    /// (0.0) disables gating.
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_visibility: f64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            smoothing_radius: 2,
            sample_stride: 1,
            min_visibility: 0.0,
        }
    }
}

impl AnalyzeOptions {
    /// Create options from environment variables, falling back to defaults.
    ///
    /// - `FORMCHECK_SMOOTHING_RADIUS`
    /// - `FORMCHECK_SAMPLE_STRIDE`
    /// - `FORMCHECK_MIN_VISIBILITY`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            smoothing_radius: std::env::var("FORMCHECK_SMOOTHING_RADIUS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.smoothing_radius),
            sample_stride: std::env::var("FORMCHECK_SAMPLE_STRIDE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.sample_stride),
            min_visibility: std::env::var("FORMCHECK_MIN_VISIBILITY")
                .ok()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(defaults.min_visibility),
        }
    }

    /// Builder-style setter for the smoothing radius.
    pub fn with_smoothing_radius(mut self, radius: usize) -> Self {
        self.smoothing_radius = radius.min(MAX_SMOOTHING_RADIUS);
        self
    }

    /// Builder-style setter for the chart sampling stride (at least 1).
    pub fn with_sample_stride(mut self, stride: usize) -> Self {
        self.sample_stride = stride.max(1);
        self
    }

    /// Builder-style setter for the visibility floor. `NaN` keeps the default.
    pub fn with_min_visibility(mut self, min_visibility: f64) -> Self {
        self.min_visibility = if min_visibility.is_nan() {
            Self::default().min_visibility
        } else {
            min_visibility.clamp(0.0, 1.0)
        };
        self
    }

    /// Validate every field, including values the range rules let through.
    ///
    /// `NaN` passes `range` because every comparison with it is false.
    pub fn check(&self) -> EngineResult<()> {
        self.validate()?;
        if !self.min_visibility.is_finite() {
            return Err(EngineError::invalid_options(format!(
                "min_visibility must be a finite value in [0, 1], got {}",
                self.min_visibility
            )));
        }
        Ok(())
    }
}
