//! Utility modules for growth assessment
//!
//! - Normal: standard normal CDF and quantile (SD <-> percentile rank)

pub mod normal;

// Re-export commonly used functions
pub use normal::{normal_cdf, normal_quantile, percentile_to_z};
