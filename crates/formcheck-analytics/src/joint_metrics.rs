//! Per-frame joint-angle extraction.
//!
//! Each metric is an angle over a fixed landmark triple. Bilateral metrics
//! are measured on both sides of the body:
//!
//! | Metric     | Triple                 | Sides                              |
//! |------------|------------------------|------------------------------------|
//! | knee       | hip - knee - ankle     | mean of computable sides           |
//! | elbow/arms | shoulder - elbow - wrist | mean of computable sides         |
//! | back       | ear - shoulder - hip   | mean of computable sides           |
//! | body       | shoulder - hip - ankle | mean of computable sides           |
//! | hip        | shoulder - hip - knee  | left, right as fallback            |
//! | front_knee | hip - knee - ankle     | leg whose knee is higher in image  |

use std::collections::BTreeMap;

use formcheck_models::{LandmarkPoint, MetricName, PoseLandmark};

use crate::geometry::joint_angle;

use PoseLandmark::*;

type Triple = (PoseLandmark, PoseLandmark, PoseLandmark);

const KNEE: (Triple, Triple) = ((LeftHip, LeftKnee, LeftAnkle), (RightHip, RightKnee, RightAnkle));
const ELBOW: (Triple, Triple) = (
    (LeftShoulder, LeftElbow, LeftWrist),
    (RightShoulder, RightElbow, RightWrist),
);
const BACK: (Triple, Triple) = ((LeftEar, LeftShoulder, LeftHip), (RightEar, RightShoulder, RightHip));
const BODY: (Triple, Triple) = (
    (LeftShoulder, LeftHip, LeftAnkle),
    (RightShoulder, RightHip, RightAnkle),
);
const HIP: (Triple, Triple) = ((LeftShoulder, LeftHip, LeftKnee), (RightShoulder, RightHip, RightKnee));

/// Landmark view that hides points failing the visibility floor.
#[derive(Clone, Copy)]
struct Landmarks<'a> {
    points: &'a [Option<LandmarkPoint>],
    min_visibility: f64,
}

impl<'a> Landmarks<'a> {
    fn get(&self, which: PoseLandmark) -> Option<&'a LandmarkPoint> {
        self.points
            .get(which.index())
            .and_then(Option::as_ref)
            .filter(|p| p.is_usable(self.min_visibility))
    }

    fn angle(&self, (a, b, c): Triple) -> Option<f64> {
        joint_angle(self.get(a), self.get(b), self.get(c))
    }

    /// Mean of both sides, or whichever side is computable.
    fn bilateral(&self, (left, right): (Triple, Triple)) -> Option<f64> {
        match (self.angle(left), self.angle(right)) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }

    /// Left side if computable, otherwise right.
    fn left_preferred(&self, (left, right): (Triple, Triple)) -> Option<f64> {
        self.angle(left).or_else(|| self.angle(right))
    }

    /// Knee angle of the leg whose knee sits higher in the image.
    ///
    /// Smaller `y` is read as the raised or forward leg. Ties go to the left
    /// leg. There is no fallback to the other leg when the operative one
    /// cannot be measured.
    fn front_knee(&self) -> Option<f64> {
        let (left, right) = KNEE;
        let operative = match (self.get(LeftKnee), self.get(RightKnee)) {
            (Some(l), Some(r)) => {
                if r.y < l.y {
                    right
                } else {
                    left
                }
            }
            (Some(_), None) => left,
            (None, Some(_)) => right,
            (None, None) => return None,
        };
        self.angle(operative)
    }
}

/// Compute a single metric for one frame.
pub fn metric_value(
    landmarks: &[Option<LandmarkPoint>],
    metric: MetricName,
    min_visibility: f64,
) -> Option<f64> {
    let view = Landmarks {
        points: landmarks,
        min_visibility,
    };

    match metric {
        MetricName::Knee => view.bilateral(KNEE),
        MetricName::Elbow | MetricName::Arms => view.bilateral(ELBOW),
        MetricName::Back => view.bilateral(BACK),
        MetricName::Body => view.bilateral(BODY),
        MetricName::Hip => view.left_preferred(HIP),
        MetricName::FrontKnee => view.front_knee(),
    }
}

/// Compute every known metric for one frame.
pub fn extract_metrics(
    landmarks: &[Option<LandmarkPoint>],
    min_visibility: f64,
) -> BTreeMap<MetricName, Option<f64>> {
    extract_selected(landmarks, MetricName::ALL.iter().copied(), min_visibility)
}

/// Compute the given metrics for one frame.
pub fn extract_selected(
    landmarks: &[Option<LandmarkPoint>],
    metrics: impl IntoIterator<Item = MetricName>,
    min_visibility: f64,
) -> BTreeMap<MetricName, Option<f64>> {
    metrics
        .into_iter()
        .map(|m| (m, metric_value(landmarks, m, min_visibility)))
        .collect()
}
