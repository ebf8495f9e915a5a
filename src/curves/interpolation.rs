//! Curve Interpolator
//!
//! Reads percentile bands at an arbitrary age by blending the two reference
//! rows that bracket it. No extrapolation along the age axis: ages outside
//! the table get the boundary row unchanged.

use crate::types::PercentileBandSet;

/// Interpolate percentile bands at `age` (months)
///
/// Returns `None` only for an empty table.
pub fn interpolate_bands(points: &[PercentileBandSet], age: f64) -> Option<PercentileBandSet> {
    let first = points.first()?;
    let last = points.last()?;

    // `!(a > b)` also routes NaN ages to the first row
    if !(age > first.age) {
        return Some(*first);
    }
    if age >= last.age {
        return Some(*last);
    }

    // first.age < age < last.age, so 1 <= upper < len
    let upper = points.partition_point(|p| p.age <= age);
    Some(lerp_bands(&points[upper - 1], &points[upper], age))
}

/// Blend each band independently between two rows
///
/// Equal ages return the lower row instead of dividing by zero.
fn lerp_bands(p0: &PercentileBandSet, p1: &PercentileBandSet, age: f64) -> PercentileBandSet {
    let span = p1.age - p0.age;
    if span == 0.0 {
        return *p0;
    }

    let fraction = (age - p0.age) / span;
    let (v0, v1) = (p0.values(), p1.values());
    let mut blended = [0.0; 7];
    for (i, out) in blended.iter_mut().enumerate() {
        *out = v0[i] + (v1[i] - v0[i]) * fraction;
    }

    PercentileBandSet::from_values(age, blended)
}
