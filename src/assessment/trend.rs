//! Trend Analyzer
//!
//! Flags abrupt percentile shifts between a new assessment and the most
//! recent earlier one.
//!
//! Detection only runs once at least `min_prior_results` earlier results
//! exist, but the comparison is against the last of them only, not the whole
//! history.

use crate::config::AssessmentConfig;
use crate::types::AssessmentResult;

/// Shift check with the default threshold (25 points, 2 prior results)
pub fn detect_shift(current: &AssessmentResult, prior: &[AssessmentResult]) -> bool {
    detect_shift_with(current, prior, &AssessmentConfig::default())
}

/// Shift check with configured threshold and minimum history
///
/// Results without a percentile (unknown status) never trigger a shift.
pub fn detect_shift_with(
    current: &AssessmentResult,
    prior: &[AssessmentResult],
    config: &AssessmentConfig,
) -> bool {
    if prior.len() < config.min_prior_results {
        return false;
    }
    let Some(previous) = prior.last() else {
        return false;
    };

    match (current.percentile, previous.percentile) {
        (Some(now), Some(before)) => (now - before).abs() > config.shift_threshold,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Description, GrowthStatus};

    fn result(percentile: f64) -> AssessmentResult {
        AssessmentResult {
            age_months: 6.0,
            value: 7.5,
            percentile: Some(percentile),
            status: GrowthStatus::from_percentile(percentile),
            description: Description::AbovePeers { percent: percentile.round() as u8 },
        }
    }

    #[test]
    fn test_shift_against_last_prior() {
        let prior = [result(85.0), result(40.0)];
        assert!(detect_shift(&result(90.0), &prior));
    }

    #[test]
    fn test_single_prior_never_shifts() {
        let prior = [result(10.0)];
        assert!(!detect_shift(&result(90.0), &prior));
        assert!(!detect_shift(&result(90.0), &[]));
    }

    #[test]
    fn test_only_last_prior_is_compared() {
        // Far from the first entry but close to the last one
        let prior = [result(5.0), result(80.0)];
        assert!(!detect_shift(&result(90.0), &prior));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let prior = [result(50.0), result(50.0)];
        assert!(!detect_shift(&result(75.0), &prior));
        assert!(detect_shift(&result(75.5), &prior));
        assert!(detect_shift(&result(24.0), &prior));
    }

    #[test]
    fn test_unknown_results_do_not_shift() {
        let prior = [result(50.0), AssessmentResult::unknown(5.0, 7.0)];
        assert!(!detect_shift(&result(95.0), &prior));
        assert!(!detect_shift(&AssessmentResult::unknown(6.0, 7.0), &[result(1.0), result(1.0)]));
    }

    #[test]
    fn test_configured_threshold() {
        let config = AssessmentConfig {
            shift_threshold: 10.0,
            min_prior_results: 1,
            ..AssessmentConfig::default()
        };
        assert!(detect_shift_with(&result(62.0), &[result(50.0)], &config));
    }
}
