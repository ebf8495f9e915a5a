//! Reference data errors
//!
//! Raised while building reference datasets. Corrupt tables are a programming
//! error and are reported here, at construction time, never during per-query
//! classification.

use crate::types::{Metric, Sex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference table {metric:?}/{sex:?} row {index}: non-finite value")]
    NonFiniteValue { metric: Metric, sex: Sex, index: usize },

    #[error("reference table {metric:?}/{sex:?} row {index}: negative age {age}")]
    NegativeAge { metric: Metric, sex: Sex, index: usize, age: f64 },

    #[error(
        "reference table {metric:?}/{sex:?} row {index}: age {age} does not follow {previous}"
    )]
    NonAscendingAge {
        metric: Metric,
        sex: Sex,
        index: usize,
        age: f64,
        previous: f64,
    },

    #[error("reference table {metric:?}/{sex:?} row {index}: SD columns are not non-decreasing")]
    NonMonotonicBands { metric: Metric, sex: Sex, index: usize },

    #[error("reference table {metric:?}/{sex:?} appears more than once")]
    DuplicateTable { metric: Metric, sex: Sex },

    #[error("failed to parse reference tables: {0}")]
    Parse(#[from] serde_json::Error),
}
