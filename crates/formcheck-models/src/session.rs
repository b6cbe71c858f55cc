//! Recorded session models.
//!
//! A session is produced by the capture subsystem and handed to the
//! analytics engine read-only.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::landmark::LandmarkPoint;

/// One timestamped snapshot of all tracked landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Frame {
    /// Capture timestamp in milliseconds, non-decreasing within a session
    pub t: u64,

    /// Landmark slots indexed by [`crate::PoseLandmark`]; `null` when lost
    #[serde(default)]
    pub landmarks: Vec<Option<LandmarkPoint>>,
}

impl Frame {
    /// Create a frame from a fully populated landmark list.
    pub fn new(t: u64, landmarks: Vec<Option<LandmarkPoint>>) -> Self {
        Self { t, landmarks }
    }

    /// Create a frame in which the tracker found nobody.
    pub fn empty(t: u64) -> Self {
        Self {
            t,
            landmarks: Vec::new(),
        }
    }

    /// Number of landmark slots that hold a point.
    pub fn present_count(&self) -> usize {
        self.landmarks.iter().filter(|l| l.is_some()).count()
    }
}

/// An ordered recording of frames for one activity attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Free-form activity identifier chosen by the user (e.g. "Squat", "plank_hold")
    pub activity_id: String,

    /// Frames in capture order
    #[serde(default)]
    pub frames: Vec<Frame>,

    /// When the recording started, if the capture layer recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create a new session.
    pub fn new(activity_id: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            activity_id: activity_id.into(),
            frames,
            recorded_at: None,
        }
    }

    /// Set the recording start time.
    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Returns true if the session holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time between the first and last frame in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.t.saturating_sub(first.t),
            _ => 0,
        }
    }

    /// Index of the first frame whose timestamp goes backwards, if any.
    pub fn first_out_of_order(&self) -> Option<usize> {
        self.frames
            .windows(2)
            .position(|pair| pair[1].t < pair[0].t)
            .map(|i| i + 1)
    }
}
