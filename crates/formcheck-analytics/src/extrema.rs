//! Local extremum detection over a smoothed series.

use formcheck_models::Polarity;

/// Indices of strict local minima and maxima, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extrema {
    pub valleys: Vec<usize>,
    pub peaks: Vec<usize>,
}

impl Extrema {
    /// Extremum indices of the given kind.
    pub fn of(&self, polarity: Polarity) -> &[usize] {
        match polarity {
            Polarity::Valley => &self.valleys,
            Polarity::Peak => &self.peaks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.valleys.is_empty() && self.peaks.is_empty()
    }
}

/// Find strict interior extrema.
///
/// Endpoints are never extrema, and neither is any index whose value or
/// either neighbour is non-finite. Plateaus produce no extremum.
pub fn find_extrema(smoothed: &[f64]) -> Extrema {
    let mut extrema = Extrema::default();
    if smoothed.len() < 3 {
        return extrema;
    }

    for (offset, window) in smoothed.windows(3).enumerate() {
        let (prev, cur, next) = (window[0], window[1], window[2]);
        if !(prev.is_finite() && cur.is_finite() && next.is_finite()) {
            continue;
        }

        let i = offset + 1;
        if cur < prev && cur < next {
            extrema.valleys.push(i);
        } else if cur > prev && cur > next {
            extrema.peaks.push(i);
        }
    }

    extrema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_valley() {
        let series = [175.0, 150.0, 110.0, 90.0, 110.0, 150.0, 175.0];
        let extrema = find_extrema(&series);
        assert_eq!(extrema.valleys, vec![3]);
        assert!(extrema.peaks.is_empty());
    }

    #[test]
    fn test_alternating() {
        let series = [1.0, 3.0, 1.0, 3.0, 1.0];
        let extrema = find_extrema(&series);
        assert_eq!(extrema.peaks, vec![1, 3]);
        assert_eq!(extrema.valleys, vec![2]);
        assert_eq!(extrema.of(Polarity::Peak), &[1, 3]);
        assert_eq!(extrema.of(Polarity::Valley), &[2]);
    }

    #[test]
    fn test_endpoints_excluded() {
        let extrema = find_extrema(&[0.0, 5.0, 10.0]);
        assert!(extrema.is_empty());
    }

    #[test]
    fn test_plateau_is_not_extremum() {
        let extrema = find_extrema(&[5.0, 1.0, 1.0, 5.0]);
        assert!(extrema.valleys.is_empty());
    }

    #[test]
    fn test_non_finite_never_extremum() {
        let series = [5.0, f64::NAN, 5.0, 1.0, 5.0];
        let extrema = find_extrema(&series);
        assert_eq!(extrema.valleys, vec![3]);

        // Neighbour of the candidate is NaN
        let series = [f64::NAN, 1.0, 5.0];
        assert!(find_extrema(&series).is_empty());
    }

    #[test]
    fn test_short_series() {
        assert!(find_extrema(&[]).is_empty());
        assert!(find_extrema(&[1.0, 0.0]).is_empty());
    }
}
