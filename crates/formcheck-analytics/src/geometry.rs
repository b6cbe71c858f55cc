//! Joint angle calculation using the dot product.
//!
//! The angle at vertex `b` is measured between the rays b→a and b→c in the
//! image plane:
//!
//! ```text
//! cos(θ) = (v1 · v2) / (|v1| × |v2|)
//! ```

use formcheck_models::LandmarkPoint;

/// Rays shorter than this are treated as coincident points.
const MIN_RAY_LENGTH: f64 = 1e-9;

/// Angle at `b` in degrees, in `[0, 180]`.
///
/// Returns `None` if any point is missing or non-finite, if `a` or `c`
/// coincides with `b`, or if the rays are too long to represent.
pub fn joint_angle(
    a: Option<&LandmarkPoint>,
    b: Option<&LandmarkPoint>,
    c: Option<&LandmarkPoint>,
) -> Option<f64> {
    let (a, b, c) = (a?, b?, c?);
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return None;
    }

    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);
    if !(mag1.is_finite() && mag2.is_finite()) {
        return None;
    }
    if mag1 < MIN_RAY_LENGTH || mag2 < MIN_RAY_LENGTH {
        return None;
    }

    // Unit rays keep the dot product in range for very large coordinates
    let (u1, u2) = ((v1.0 / mag1, v1.1 / mag1), (v2.0 / mag2, v2.1 / mag2));
    let dot = u1.0 * u2.0 + u1.1 * u2.1;
    // Rounding can push the ratio just past ±1
    let cos_angle = dot.clamp(-1.0, 1.0);

    let angle = cos_angle.acos().to_degrees();
    angle.is_finite().then_some(angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> LandmarkPoint {
        LandmarkPoint::new(x, y)
    }

    #[test]
    fn test_straight_limb() {
        let angle = joint_angle(Some(&p(0.0, 0.0)), Some(&p(0.5, 0.0)), Some(&p(1.0, 0.0))).unwrap();
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(Some(&p(0.0, 0.0)), Some(&p(0.5, 0.0)), Some(&p(0.5, 0.5))).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_folded_limb() {
        let angle = joint_angle(Some(&p(1.0, 0.0)), Some(&p(0.0, 0.0)), Some(&p(2.0, 0.0))).unwrap();
        assert!(angle.abs() < 1e-9);
    }

    #[test]
    fn test_missing_point() {
        assert!(joint_angle(None, Some(&p(0.5, 0.0)), Some(&p(1.0, 0.0))).is_none());
        assert!(joint_angle(Some(&p(0.0, 0.0)), None, Some(&p(1.0, 0.0))).is_none());
        assert!(joint_angle(Some(&p(0.0, 0.0)), Some(&p(0.5, 0.0)), None).is_none());
    }

    #[test]
    fn test_degenerate_rays() {
        let b = p(0.5, 0.5);
        assert!(joint_angle(Some(&b), Some(&b), Some(&p(1.0, 0.0))).is_none());
        assert!(joint_angle(Some(&p(1.0, 0.0)), Some(&b), Some(&b)).is_none());
    }

    #[test]
    fn test_non_finite_input() {
        let bad = p(f64::INFINITY, 0.0);
        assert!(joint_angle(Some(&bad), Some(&p(0.5, 0.0)), Some(&p(1.0, 0.0))).is_none());
    }

    #[test]
    fn test_huge_coordinates() {
        let angle = joint_angle(Some(&p(1e200, 0.0)), Some(&p(0.0, 0.0)), Some(&p(1e200, 1e200))).unwrap();
        assert!((angle - 45.0).abs() < 1e-9);

        // Ray length overflows
        assert!(joint_angle(Some(&p(f64::MAX, 0.0)), Some(&p(-f64::MAX, 0.0)), Some(&p(0.0, 1.0))).is_none());
    }

    #[test]
    fn test_nearly_collinear_does_not_nan() {
        let angle = joint_angle(
            Some(&p(0.0, 0.0)),
            Some(&p(0.1, 0.1)),
            Some(&p(0.2, 0.2 + 1e-15)),
        )
        .unwrap();
        assert!(angle.is_finite());
        assert!((0.0..=180.0).contains(&angle));
    }
}
