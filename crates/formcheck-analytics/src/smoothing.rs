//! Smoothing and statistical helpers for metric series.
//!
//! Series are per-frame `Option<f64>` values where `None` marks a frame in
//! which the metric could not be measured. Smoothed output uses `NaN` for
//! positions with no measurable neighbour so that gaps never read as zero.

// === Statistical Functions ===

/// Arithmetic mean of a slice of values (0.0 when empty).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of optional values where missing entries count as zero.
pub fn mean_with_missing_as_zero(values: &[Option<f64>]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.unwrap_or(0.0)).sum::<f64>() / values.len() as f64
}

// === Filtering Functions ===

/// Centered moving average that skips missing values.
///
/// Index `i` averages every measurable value in `[i - radius, i + radius]`,
/// clamped to the series bounds. A window with nothing measurable yields
/// `NaN`. The output always has the input's length.
pub fn smooth(series: &[Option<f64>], radius: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = Vec::with_capacity(n);

    for i in 0..n {
        let start = i.saturating_sub(radius);
        let end = (i + radius + 1).min(n);

        let mut sum = 0.0;
        let mut count = 0usize;
        for value in series[start..end].iter().flatten() {
            if value.is_finite() {
                sum += value;
                count += 1;
            }
        }

        result.push(if count == 0 { f64::NAN } else { sum / count as f64 });
    }

    result
}

/// Finite values of `smoothed` within `[start, end]` (inclusive).
pub fn finite_window(smoothed: &[f64], start: usize, end: usize) -> Vec<f64> {
    let end = end.min(smoothed.len().saturating_sub(1));
    if smoothed.is_empty() || start > end {
        return Vec::new();
    }
    smoothed[start..=end]
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[10.0]), 10.0);
    }

    #[test]
    fn test_mean_missing_as_zero() {
        assert_eq!(mean_with_missing_as_zero(&[]), 0.0);
        assert_eq!(mean_with_missing_as_zero(&[Some(1.0), None]), 0.5);
        assert_eq!(mean_with_missing_as_zero(&[None, None]), 0.0);
    }

    #[test]
    fn test_smooth_bridges_gaps() {
        let series = vec![None, Some(10.0), None, Some(20.0), None];
        let smoothed = smooth(&series, 2);
        assert_eq!(smoothed.len(), 5);
        assert!((smoothed[2] - 15.0).abs() < 1e-12);
        assert!((smoothed[0] - 10.0).abs() < 1e-12);
        assert!((smoothed[4] - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_radius_zero_identity() {
        let series = vec![Some(1.5), Some(-2.0), Some(170.25), Some(0.1)];
        let smoothed = smooth(&series, 0);
        for (raw, out) in series.iter().zip(&smoothed) {
            assert_eq!(raw.unwrap(), *out);
        }
    }

    #[test]
    fn test_smooth_empty_window_is_nan_not_zero() {
        let series = vec![Some(5.0), None, None, None, Some(7.0)];
        let smoothed = smooth(&series, 1);
        assert!(smoothed[2].is_nan());
        assert!((smoothed[1] - 5.0).abs() < 1e-12);
        assert!((smoothed[3] - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_moving_average() {
        let series: Vec<Option<f64>> = (1..=5).map(|v| Some(v as f64)).collect();
        let smoothed = smooth(&series, 1);
        assert!((smoothed[2] - 3.0).abs() < 1e-12);
        assert!((smoothed[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_empty_series() {
        assert!(smooth(&[], 3).is_empty());
    }

    #[test]
    fn test_finite_window() {
        let smoothed = vec![1.0, f64::NAN, 3.0, 4.0];
        assert_eq!(finite_window(&smoothed, 0, 2), vec![1.0, 3.0]);
        assert_eq!(finite_window(&smoothed, 1, 1), Vec::<f64>::new());
        assert_eq!(finite_window(&smoothed, 2, 10), vec![3.0, 4.0]);
        assert!(finite_window(&[], 0, 0).is_empty());
    }
}
