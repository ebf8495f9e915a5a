//! Standard normal distribution helpers
//!
//! Used to map SD offsets onto percentile ranks. `libm::erf` provides the
//! error function; the quantile is found by bisection since the tables only
//! need a handful of fixed ranks.

use std::f64::consts::SQRT_2;

const QUANTILE_ITERATIONS: usize = 100;
const QUANTILE_BOUND: f64 = 10.0;

/// Φ(z): probability that a standard normal variate is <= z
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + libm::erf(z / SQRT_2))
}

/// Φ⁻¹(p) for p in (0, 1)
///
/// Returns exactly 0.0 for p = 0.5 and is antisymmetric around it, so
/// symmetric ranks (P3/P97, P10/P90, P25/P75) get mirrored z-scores.
/// Out-of-range inputs saturate at ±10.
pub fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return -QUANTILE_BOUND;
    }
    if p >= 1.0 {
        return QUANTILE_BOUND;
    }
    if p == 0.5 {
        return 0.0;
    }
    if p < 0.5 {
        return -normal_quantile(1.0 - p);
    }

    let (mut lo, mut hi) = (0.0, QUANTILE_BOUND);
    for _ in 0..QUANTILE_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if normal_cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// z-score of a percentile rank expressed on the 0-100 scale
///
/// Mirrored on the 0-100 scale, where 100 - p is exact for whole ranks.
pub fn percentile_to_z(percentile: f64) -> f64 {
    if percentile < 50.0 {
        return -percentile_to_z(100.0 - percentile);
    }
    normal_quantile(percentile / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cdf_reference_points() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_7, epsilon = 1e-6);
        assert_abs_diff_eq!(normal_cdf(-2.0), 0.022_750_1, epsilon = 1e-6);
    }

    #[test]
    fn test_quantile_known_ranks() {
        assert_eq!(percentile_to_z(50.0), 0.0);
        assert_abs_diff_eq!(percentile_to_z(97.0), 1.880_794, epsilon = 1e-5);
        assert_abs_diff_eq!(percentile_to_z(90.0), 1.281_552, epsilon = 1e-5);
        assert_abs_diff_eq!(percentile_to_z(75.0), 0.674_490, epsilon = 1e-5);
    }

    #[test]
    fn test_quantile_is_antisymmetric() {
        for p in [3.0, 10.0, 25.0] {
            assert_eq!(percentile_to_z(p), -percentile_to_z(100.0 - p));
        }
    }

    #[test]
    fn test_quantile_inverts_cdf() {
        for z in [-2.5, -1.0, 0.3, 1.7] {
            assert_abs_diff_eq!(normal_quantile(normal_cdf(z)), z, epsilon = 1e-9);
        }
    }
}
