//! Per-measurement assessment pipeline
//!
//! - `classifier.rs` - value + percentile bands -> percentile, status
//! - `trend.rs` - abrupt percentile shift against the previous result
//! - `advice.rs` - status + trend -> suggestion tags

pub mod classifier;
pub mod trend;
pub mod advice;

pub use classifier::{classify, classify_measurement, percentile_from_bands};
pub use trend::{detect_shift, detect_shift_with};
pub use advice::generate_suggestions;
