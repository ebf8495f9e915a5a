//! Percentile Classifier
//!
//! Places a measured value within interpolated percentile bands.
//!
//! Algorithm:
//! 1. value < P3: percentile = value / P3 × 3 (linear from the origin)
//! 2. P3 <= value < P97: find bracketing bands [Pi, Pi+1] and interpolate
//!    percentile = ri + fraction × (ri+1 - ri)
//! 3. value >= P97: percentile = 97 + (value - P97) / P97 × 3, capped at 100
//!
//! The tail formulas are a heuristic, not a statistical extrapolation of the
//! reference distribution. They are kept for compatibility with existing
//! results.

use crate::data::ReferenceDataset;
use crate::types::{AssessmentResult, Band, Description, GrowthStatus, Measurement, PercentileBandSet};

const LOW_TAIL_RANK: f64 = 3.0;
const HIGH_TAIL_RANK: f64 = 97.0;
const TAIL_SPAN: f64 = 3.0;

/// Percentile estimate in [0, 100] for `value` against `bands`
pub fn percentile_from_bands(bands: &PercentileBandSet, value: f64) -> f64 {
    let values = bands.values();
    let ranks = Band::ALL.map(|band| band.rank());
    let (p3, p97) = (values[0], values[6]);

    let percentile = if value < p3 {
        if p3 > 0.0 {
            value / p3 * LOW_TAIL_RANK
        } else {
            0.0
        }
    } else if value >= p97 {
        if p97 > 0.0 {
            HIGH_TAIL_RANK + (value - p97) / p97 * TAIL_SPAN
        } else {
            100.0
        }
    } else {
        interpolate_rank(&values, &ranks, value)
    };

    percentile.clamp(0.0, 100.0)
}

/// Linear interpolation of the percentile rank inside [P3, P97)
fn interpolate_rank(values: &[f64; 7], ranks: &[f64; 7], value: f64) -> f64 {
    for i in 0..6 {
        if values[i] <= value && value <= values[i + 1] {
            let width = values[i + 1] - values[i];
            let fraction = if width > 0.0 { (value - values[i]) / width } else { 0.0 };
            return ranks[i] + fraction * (ranks[i + 1] - ranks[i]);
        }
    }

    // Unreachable for P3 <= value < P97 with monotone bands
    50.0
}

/// Description template for a final percentile
pub fn describe(percentile: f64, status: GrowthStatus) -> Description {
    let rounded = percentile.round().clamp(0.0, 100.0) as u8;
    match status {
        GrowthStatus::Low => Description::BelowPeers { percent: 100 - rounded },
        GrowthStatus::Normal | GrowthStatus::High => Description::AbovePeers { percent: rounded },
        GrowthStatus::Unknown => Description::Unavailable,
    }
}

/// Classify `value` against percentile bands
///
/// Status depends only on the final percentile: < 3 low, > 97 high, else
/// normal (3 and 97 themselves are normal). The result carries the bands'
/// age; the assessor overwrites it with the measurement age.
pub fn classify(bands: &PercentileBandSet, value: f64) -> AssessmentResult {
    if !value.is_finite() {
        return AssessmentResult::unknown(bands.age, value);
    }

    let percentile = percentile_from_bands(bands, value);
    let status = GrowthStatus::from_percentile(percentile);

    AssessmentResult {
        age_months: bands.age,
        value,
        percentile: Some(percentile),
        status,
        description: describe(percentile, status),
    }
}

/// Interpolate the dataset at the measurement age and classify
///
/// An empty dataset degrades to an unknown result.
pub fn classify_measurement(dataset: &ReferenceDataset, measurement: Measurement) -> AssessmentResult {
    let Some(bands) = dataset.interpolate(measurement.age_months) else {
        tracing::warn!(
            "Reference dataset {:?}/{:?} is empty; assessment unavailable",
            dataset.metric(),
            dataset.sex()
        );
        return AssessmentResult::unknown(measurement.age_months, measurement.value);
    };

    AssessmentResult {
        age_months: measurement.age_months,
        ..classify(&bands, measurement.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Metric, Sex};
    use approx::assert_relative_eq;

    fn bands() -> PercentileBandSet {
        PercentileBandSet::from_values(6.0, [6.0, 6.5, 7.2, 7.9, 8.6, 9.3, 10.0])
    }

    #[test]
    fn test_exact_median() {
        let result = classify(&bands(), 7.9);
        assert_eq!(result.percentile, Some(50.0));
        assert_eq!(result.status, GrowthStatus::Normal);
        assert_eq!(result.description, Description::AbovePeers { percent: 50 });
    }

    #[test]
    fn test_boundaries_are_normal() {
        let low_edge = classify(&bands(), 6.0);
        assert_eq!(low_edge.percentile, Some(3.0));
        assert_eq!(low_edge.status, GrowthStatus::Normal);

        let high_edge = classify(&bands(), 10.0);
        assert_eq!(high_edge.percentile, Some(97.0));
        assert_eq!(high_edge.status, GrowthStatus::Normal);
    }

    #[test]
    fn test_within_segment() {
        // Halfway between P25 (7.2) and P50 (7.9)
        let result = classify(&bands(), 7.55);
        assert_relative_eq!(result.percentile.unwrap(), 37.5, epsilon = 1e-9);

        // Halfway between P90 (9.3) and P97 (10.0)
        let result = classify(&bands(), 9.65);
        assert_relative_eq!(result.percentile.unwrap(), 93.5, epsilon = 1e-9);
    }

    #[test]
    fn test_low_tail() {
        let result = classify(&bands(), 3.0);
        assert_relative_eq!(result.percentile.unwrap(), 1.5);
        assert_eq!(result.status, GrowthStatus::Low);
        assert_eq!(result.description, Description::BelowPeers { percent: 98 });
    }

    #[test]
    fn test_low_tail_saturates_at_zero() {
        let result = classify(&bands(), -2.0);
        assert_eq!(result.percentile, Some(0.0));
        assert_eq!(result.status, GrowthStatus::Low);
        assert_eq!(result.description, Description::BelowPeers { percent: 100 });
    }

    #[test]
    fn test_high_tail() {
        // 10% above P97 -> 97 + 0.3
        let result = classify(&bands(), 11.0);
        assert_relative_eq!(result.percentile.unwrap(), 97.3, epsilon = 1e-9);
        assert_eq!(result.status, GrowthStatus::High);
        assert_eq!(result.description, Description::AbovePeers { percent: 97 });
    }

    #[test]
    fn test_high_tail_capped() {
        let result = classify(&bands(), 100.0);
        assert_eq!(result.percentile, Some(100.0));
        assert_eq!(result.status, GrowthStatus::High);
    }

    #[test]
    fn test_flat_segment_uses_lower_rank() {
        let flat = PercentileBandSet::from_values(0.0, [5.0, 6.0, 7.0, 7.0, 8.0, 9.0, 10.0]);
        // 7.0 first matches [P10, P25] at its upper end
        assert_eq!(percentile_from_bands(&flat, 7.0), 25.0);
    }

    #[test]
    fn test_non_finite_value_is_unknown() {
        let result = classify(&bands(), f64::NAN);
        assert_eq!(result.status, GrowthStatus::Unknown);
        assert_eq!(result.percentile, None);
    }

    #[test]
    fn test_empty_dataset_is_unknown() {
        let dataset = ReferenceDataset::from_sd_points(Metric::WeightForAge, Sex::Male, &[]).unwrap();
        let result = classify_measurement(&dataset, Measurement { age_months: 4.0, value: 6.1 });
        assert_eq!(result.status, GrowthStatus::Unknown);
        assert_eq!(result.percentile, None);
        assert_eq!(result.description, Description::Unavailable);
        assert_eq!(result.age_months, 4.0);
    }
}
