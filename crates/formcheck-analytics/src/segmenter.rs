//! State machine turning extrema of the primary metric into reps.
//!
//! Extrema of the rule's polarity are the *working* points of a rep (the
//! bottom of a squat, the top of a bridge). Extrema of the opposite kind,
//! plus the first and last frame, are *rest* boundaries. Consecutive
//! boundaries delimit a candidate window, which becomes a rep only if a
//! working point falls inside it. A rep therefore spans rest to rest, and its
//! `min_value`/`max_value` cover the whole window, not just the working half.
//!
//! # State Machine
//!
//! ```text
//!                      working extremum
//!        ┌──────────┐ ─────────────────► ┌──────────┐
//!        │   Open   │                    │  Loaded  │
//!        └──────────┘ ◄───────────────── └──────────┘
//!          ▲      │    boundary: evaluate    │
//!          └──────┘    window [start, b]     │ working extremum
//!        boundary: restart                   └──► (stays Loaded)
//! ```
//!
//! Evaluated windows are then filtered and classified:
//! - too short (`end - start < min_frames`) or nothing finite: discarded
//! - depth: working extremum within tolerance (full) or half tolerance (close)
//! - good: full depth and mean score ≥ correct threshold, or close depth and
//!   mean score ≥ the softer threshold

use tracing::debug;

use formcheck_models::{MetricTarget, Polarity, QualityCategory, Rep, Rule};

use crate::extrema::Extrema;
use crate::smoothing::{finite_window, mean_with_missing_as_zero};

/// Event in the ordered extremum stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    /// Rest point: session edge or opposite-kind extremum.
    Boundary(usize),
    /// Working extremum of the rule's polarity.
    Working(usize),
}

impl Marker {
    fn index(self) -> usize {
        match self {
            Marker::Boundary(i) | Marker::Working(i) => i,
        }
    }
}

/// Internal state for the segmenter state machine.
enum State {
    /// Window opened at `start`, no working extremum seen yet.
    Open { start: usize },
    /// Window opened at `start` holds at least one working extremum.
    Loaded { start: usize },
}

/// Per-frame inputs the segmenter reads.
#[derive(Debug, Clone, Copy)]
pub struct SegmentInput<'a> {
    /// Smoothed primary-metric series (`NaN` where unmeasurable)
    pub smoothed: &'a [f64],
    /// Frame scores, `None` for unscoreable frames
    pub scores: &'a [Option<f64>],
    /// Frame timestamps in milliseconds
    pub timestamps: &'a [u64],
}

/// Converts extrema of the primary metric into classified reps.
#[derive(Debug, Clone)]
pub struct RepSegmenter {
    min_frames: usize,
    polarity: Polarity,
    target: MetricTarget,
    correct_threshold: f64,
    soft_threshold: f64,
}

impl RepSegmenter {
    /// Build a segmenter for the rule, or `None` for continuous holds.
    pub fn new(rule: &Rule) -> Option<Self> {
        let polarity = rule.polarity()?;
        let min_frames = rule.min_frames_for_rep()?;

        Some(Self {
            min_frames,
            polarity,
            target: rule.primary_target(),
            correct_threshold: rule.correct_ratio_threshold,
            soft_threshold: rule.soft_threshold(),
        })
    }

    /// Run the state machine over the extrema and emit reps in time order.
    pub fn segment(&self, input: SegmentInput<'_>, extrema: &Extrema) -> Vec<Rep> {
        let n = input.smoothed.len();
        if n == 0 {
            return Vec::new();
        }

        let mut reps = Vec::new();
        let mut state = State::Open { start: 0 };

        for marker in self.markers(n, extrema) {
            state = match (state, marker) {
                (State::Open { .. }, Marker::Boundary(b)) => State::Open { start: b },
                (State::Open { start }, Marker::Working(_)) => State::Loaded { start },
                (State::Loaded { start }, Marker::Working(_)) => State::Loaded { start },
                (State::Loaded { start }, Marker::Boundary(end)) => {
                    if let Some(rep) = self.evaluate(&input, start, end) {
                        reps.push(rep);
                    }
                    State::Open { start: end }
                }
            };
        }

        reps
    }

    /// Ordered marker stream: interior extrema framed by the session edges.
    fn markers(&self, n: usize, extrema: &Extrema) -> Vec<Marker> {
        let mut markers: Vec<Marker> = extrema
            .of(self.polarity)
            .iter()
            .map(|&i| Marker::Working(i))
            .chain(
                extrema
                    .of(self.polarity.opposite())
                    .iter()
                    .map(|&i| Marker::Boundary(i)),
            )
            .collect();
        markers.sort_by_key(|m| m.index());

        // Window opens at index 0 already; only the closing edge is explicit.
        if n > 1 {
            markers.push(Marker::Boundary(n - 1));
        }
        markers
    }

    /// Validate and classify the window `[start, end]`.
    fn evaluate(&self, input: &SegmentInput<'_>, start: usize, end: usize) -> Option<Rep> {
        if end - start < self.min_frames {
            debug!(start, end, min_frames = self.min_frames, "Discarding short rep window");
            return None;
        }

        let segment = finite_window(input.smoothed, start, end);
        if segment.is_empty() {
            debug!(start, end, "Discarding rep window without measurable values");
            return None;
        }

        let min_value = segment.iter().copied().fold(f64::INFINITY, f64::min);
        let max_value = segment.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let scores = input.scores.get(start..=end).unwrap_or_default();
        let mean_frame_score = mean_with_missing_as_zero(scores);

        let depth = match self.polarity {
            Polarity::Valley => min_value,
            Polarity::Peak => max_value,
        };
        let meets_depth = self.target.within(depth, self.target.tolerance);
        let close_depth = self.target.within(depth, self.target.tolerance / 2.0);

        let is_good = (meets_depth && mean_frame_score >= self.correct_threshold)
            || (close_depth && mean_frame_score >= self.soft_threshold);

        let timestamp = |i: usize| input.timestamps.get(i).copied().unwrap_or_default();
        let (start_t, end_t) = (timestamp(start), timestamp(end));

        Some(Rep {
            start_t,
            end_t,
            duration_ms: end_t.saturating_sub(start_t),
            start_index: start,
            end_index: end,
            min_value,
            max_value,
            mean_frame_score,
            category: QualityCategory::from_score(Some(mean_frame_score)),
            is_good,
            meets_depth,
            close_depth,
            frame_count: end - start + 1,
        })
    }
}
