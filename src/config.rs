//! Assessment configuration
//!
//! Tunables for age computation and trend detection. Every field has a
//! default, so a config file only needs the values it overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Average month length used to turn day counts into fractional months
    pub days_per_month: f64,

    /// Percentile change above which a trend shift is flagged
    pub shift_threshold: f64,

    /// Prior results required before trend detection runs
    pub min_prior_results: usize,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            days_per_month: 30.44,
            shift_threshold: 25.0,
            min_prior_results: 2,
        }
    }
}

impl AssessmentConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read assessment config: {:?}", path))?;

        let config: AssessmentConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse assessment config JSON")?;

        if !(config.days_per_month > 0.0) {
            anyhow::bail!("days_per_month must be positive, got {}", config.days_per_month);
        }
        if !(config.shift_threshold >= 0.0) {
            anyhow::bail!("shift_threshold must be non-negative, got {}", config.shift_threshold);
        }

        Ok(config)
    }
}
