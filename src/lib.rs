//! Growth Scorer Rust Implementation
//!
//! Growth-percentile assessment for children: places a measured weight,
//! length/height or head circumference within an age-indexed reference
//! distribution, classifies it and produces trend-aware guidance tags.
//!
//! Module layout:
//! - `data`: reference tables and the `StandardRepository`
//! - `curves/`: SD -> percentile band conversion and age interpolation
//! - `assessment/`: classification, trend detection, suggestions
//! - `assessor`: per-record coordinator (`GrowthAssessor`)
//! - `utils/`: normal distribution helpers
//!
//! All computation is pure over immutable reference data and safe to call
//! from multiple threads.

pub mod types;
pub mod error;
pub mod config;
pub mod utils;
pub mod curves;
pub mod data;
pub mod assessment;
pub mod assessor;

// Re-export commonly used types
pub use types::{
    AssessmentResult, Band, Description, GrowthStatus, Measurement, Metric,
    PercentileBandSet, Sex, SuggestionKind, SuggestionSet, Suggestions,
};
pub use error::ReferenceError;
pub use config::AssessmentConfig;
pub use data::{ReferenceDataset, ReferenceTables, StandardRepository};
pub use assessment::{classify, detect_shift, generate_suggestions};
pub use curves::interpolate_bands;
pub use assessor::{age_in_months, BabyProfile, GrowthAssessment, GrowthAssessor, MeasurementRecord};
