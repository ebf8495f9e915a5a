//! Percentile Curve Builder
//!
//! Converts SD-offset reference rows (SD-3 .. SD+3) into the canonical seven
//! percentile bands (P3 .. P97).
//!
//! Algorithm:
//! 1. For each percentile rank p, take z_p = Φ⁻¹(p / 100)
//! 2. Treat the seven SD values as knots of a piecewise-linear curve on the
//!    z axis (z = -3 .. +3) and read the value at z_p
//!
//! |z_p| <= 1.881 for all seven ranks, so every band is read strictly inside
//! the SD table. P50 lands on the SD0 knot and is copied exactly. The mapping
//! preserves order, so non-decreasing SD columns give monotone bands.

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;
use crate::types::{Band, Metric, PercentileBandSet, Sex};
use crate::utils::normal::percentile_to_z;

/// SD offsets of the raw table columns
pub const SD_OFFSETS: [f64; 7] = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];

/// One raw reference row: age plus SD-3 .. SD+3 values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SdReferencePoint {
    pub age_months: f64,
    pub sd: [f64; 7],
}

impl SdReferencePoint {
    /// Parse a `[age, sd-3, sd-2, sd-1, sd0, sd+1, sd+2, sd+3]` table row
    pub fn from_row(row: [f64; 8]) -> Self {
        let [age_months, sd @ ..] = row;
        Self { age_months, sd }
    }
}

/// z-scores of the seven percentile bands, ordered P3..P97
pub fn band_z_scores() -> [f64; 7] {
    Band::ALL.map(|band| percentile_to_z(band.rank()))
}

/// Read the SD curve at an arbitrary z by linear interpolation between knots
fn value_at_z(sd: &[f64; 7], z: f64) -> f64 {
    // First knot with offset >= z
    let upper = SD_OFFSETS.partition_point(|&offset| offset < z);

    if upper == 0 {
        return sd[0];
    }
    if upper == SD_OFFSETS.len() {
        return sd[SD_OFFSETS.len() - 1];
    }
    if SD_OFFSETS[upper] == z {
        return sd[upper];
    }

    let (z0, z1) = (SD_OFFSETS[upper - 1], SD_OFFSETS[upper]);
    let fraction = (z - z0) / (z1 - z0);
    sd[upper - 1] + (sd[upper] - sd[upper - 1]) * fraction
}

/// Convert a single SD row into percentile bands
pub fn sd_to_percentile_bands(point: &SdReferencePoint, z_scores: &[f64; 7]) -> PercentileBandSet {
    let values = z_scores.map(|z| value_at_z(&point.sd, z));
    PercentileBandSet::from_values(point.age_months, values)
}

/// Build percentile bands for a whole reference table
///
/// Validates the table on the way through: finite values, non-negative and
/// strictly ascending ages, non-decreasing SD columns. An empty table yields
/// an empty curve; callers degrade to an unknown assessment for it.
pub fn build_percentile_bands(
    metric: Metric,
    sex: Sex,
    raw: &[SdReferencePoint],
) -> Result<Vec<PercentileBandSet>, ReferenceError> {
    let z_scores = band_z_scores();
    let mut bands = Vec::with_capacity(raw.len());
    let mut previous_age: Option<f64> = None;

    for (index, point) in raw.iter().enumerate() {
        if !point.age_months.is_finite() || point.sd.iter().any(|v| !v.is_finite()) {
            return Err(ReferenceError::NonFiniteValue { metric, sex, index });
        }
        if point.age_months < 0.0 {
            return Err(ReferenceError::NegativeAge {
                metric,
                sex,
                index,
                age: point.age_months,
            });
        }
        if let Some(previous) = previous_age {
            if point.age_months <= previous {
                return Err(ReferenceError::NonAscendingAge {
                    metric,
                    sex,
                    index,
                    age: point.age_months,
                    previous,
                });
            }
        }
        if point.sd.windows(2).any(|w| w[0] > w[1]) {
            return Err(ReferenceError::NonMonotonicBands { metric, sex, index });
        }

        bands.push(sd_to_percentile_bands(point, &z_scores));
        previous_age = Some(point.age_months);
    }

    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn row(age: f64, sd: [f64; 7]) -> SdReferencePoint {
        SdReferencePoint { age_months: age, sd }
    }

    #[test]
    fn test_median_copies_sd0() {
        let point = row(0.0, [2.4, 2.8, 3.1, 3.5, 3.9, 4.3, 4.7]);
        let bands = sd_to_percentile_bands(&point, &band_z_scores());
        assert_eq!(bands.p50, 3.5);
        assert_eq!(bands.age, 0.0);
    }

    #[test]
    fn test_symmetric_table_gives_symmetric_bands() {
        // Evenly spaced SD values: bands sit at median + z_p
        let point = row(12.0, [7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0]);
        let bands = sd_to_percentile_bands(&point, &band_z_scores());

        assert_abs_diff_eq!(bands.p3, 10.0 - 1.880_794, epsilon = 1e-5);
        assert_abs_diff_eq!(bands.p97, 10.0 + 1.880_794, epsilon = 1e-5);
        assert_abs_diff_eq!(bands.p25, 10.0 - 0.674_490, epsilon = 1e-5);
        assert_abs_diff_eq!(bands.p90, 10.0 + 1.281_552, epsilon = 1e-5);
    }

    #[test]
    fn test_bands_stay_within_sd2() {
        let point = row(3.0, [4.3, 4.9, 5.6, 6.4, 7.2, 8.2, 9.2]);
        let bands = sd_to_percentile_bands(&point, &band_z_scores());
        assert!(bands.is_monotonic());
        assert!(bands.p3 > 4.9 && bands.p3 < 5.6);
        assert!(bands.p97 > 7.2 && bands.p97 < 8.2);
    }

    #[test]
    fn test_flat_columns_stay_monotonic() {
        let point = row(3.0, [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
        let bands = sd_to_percentile_bands(&point, &band_z_scores());
        assert!(bands.is_monotonic());
        assert_eq!(bands.p10, 5.0);
    }

    #[test]
    fn test_rejects_descending_ages() {
        let raw = [
            row(0.0, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
            row(2.0, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
            row(1.0, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
        ];
        let err = build_percentile_bands(Metric::WeightForAge, Sex::Male, &raw).unwrap_err();
        assert!(matches!(err, ReferenceError::NonAscendingAge { index: 2, .. }));
    }

    #[test]
    fn test_rejects_duplicate_ages() {
        let raw = [
            row(1.0, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
            row(1.0, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
        ];
        let err = build_percentile_bands(Metric::HeadForAge, Sex::Female, &raw).unwrap_err();
        assert!(matches!(err, ReferenceError::NonAscendingAge { index: 1, .. }));
    }

    #[test]
    fn test_rejects_non_monotonic_sd_columns() {
        let raw = [row(0.0, [1.0, 2.0, 3.0, 2.0, 5.0, 6.0, 7.0])];
        let err = build_percentile_bands(Metric::HeightForAge, Sex::Male, &raw).unwrap_err();
        assert!(matches!(err, ReferenceError::NonMonotonicBands { index: 0, .. }));
    }

    #[test]
    fn test_rejects_nan() {
        let raw = [row(0.0, [1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0])];
        let err = build_percentile_bands(Metric::HeightForAge, Sex::Male, &raw).unwrap_err();
        assert!(matches!(err, ReferenceError::NonFiniteValue { .. }));
    }

    #[test]
    fn test_empty_table_builds_empty_curve() {
        let bands = build_percentile_bands(Metric::WeightForAge, Sex::Female, &[]).unwrap();
        assert!(bands.is_empty());
    }
}
