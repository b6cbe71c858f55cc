//! Body landmark models.
//!
//! Landmarks follow the 33-point BlazePose layout produced by the upstream
//! pose tracker. A frame stores them as an index-addressed list where any
//! slot may be `null` when the tracker lost the joint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of landmark slots in a full pose.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// A tracked anatomical point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LandmarkPoint {
    /// Horizontal position (0.0 = left edge, 1.0 = right edge)
    pub x: f64,
    /// Vertical position (0.0 = top edge, 1.0 = bottom edge)
    pub y: f64,
    /// Depth relative to the hips, if the tracker provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Tracker confidence that the point is visible (0.0-1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl LandmarkPoint {
    /// Create a 2D landmark with no depth or visibility information.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// Set the visibility confidence.
    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Set the depth coordinate.
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Check that the planar coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Check if the point is usable at the given visibility floor.
    ///
    /// Points without a visibility value are always considered visible.
    pub fn is_usable(&self, min_visibility: f64) -> bool {
        self.is_finite()
            && self
                .visibility
                .map_or(true, |v| v.is_finite() && v >= min_visibility)
    }
}

/// Anatomical meaning of each landmark slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    /// Slot index of this landmark within a frame.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Look up a landmark slot, treating out-of-range indices as absent.
pub fn landmark_at(landmarks: &[Option<LandmarkPoint>], which: PoseLandmark) -> Option<&LandmarkPoint> {
    landmarks.get(which.index()).and_then(Option::as_ref)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices() {
        assert_eq!(PoseLandmark::Nose.index(), 0);
        assert_eq!(PoseLandmark::LeftShoulder.index(), 11);
        assert_eq!(PoseLandmark::RightAnkle.index(), 28);
        assert_eq!(PoseLandmark::RightFootIndex.index(), POSE_LANDMARK_COUNT - 1);
    }

    #[test]
    fn test_usable_visibility() {
        let point = LandmarkPoint::new(0.5, 0.5);
        assert!(point.is_usable(0.9));

        let faint = point.with_visibility(0.2);
        assert!(faint.is_usable(0.0));
        assert!(!faint.is_usable(0.5));

        let broken = LandmarkPoint::new(f64::NAN, 0.5);
        assert!(!broken.is_usable(0.0));
    }

    #[test]
    fn test_landmark_at_out_of_range() {
        let landmarks = vec![Some(LandmarkPoint::new(0.1, 0.2))];
        assert!(landmark_at(&landmarks, PoseLandmark::Nose).is_some());
        assert!(landmark_at(&landmarks, PoseLandmark::LeftKnee).is_none());
    }

    #[test]
    fn test_deserialize_sparse_point() {
        let point: LandmarkPoint = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(point, LandmarkPoint::new(0.25, 0.75));
    }
}
