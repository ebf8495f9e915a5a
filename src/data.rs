//! Reference Data Loading and Management
//!
//! Holds the age-indexed growth reference tables, one per (metric, sex) pair.
//! Raw SD tables are parsed from JSON, converted to percentile bands once and
//! never mutated afterwards.
//!
//! Table file layout:
//! ```json
//! { "standard": "...",
//!   "tables": [ { "metric": "weight_for_age", "sex": "male",
//!                 "rows": [[age, sd-3, sd-2, sd-1, sd0, sd+1, sd+2, sd+3], ...] } ] }
//! ```

use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::curves::{build_percentile_bands, interpolate_bands, SdReferencePoint};
use crate::error::ReferenceError;
use crate::types::{Band, Metric, PercentileBandSet, Sex};

/// Embedded reference tables: weight/height 0-84 months, head 0-36 months
const EMBEDDED_TABLES: &str = include_str!("../data/reference_tables.json");

/// Reference table file as stored on disk
#[derive(Debug, Deserialize)]
pub struct ReferenceTables {
    /// Name of the reference standard the rows were taken from
    pub standard: String,
    pub tables: Vec<RawReferenceTable>,
}

/// Raw SD rows for one (metric, sex) pair
#[derive(Debug, Deserialize)]
pub struct RawReferenceTable {
    pub metric: Metric,
    pub sex: Sex,
    pub rows: Vec<[f64; 8]>,
}

impl ReferenceTables {
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tables compiled into the crate
    pub fn embedded() -> Result<Self, ReferenceError> {
        Self::from_json(EMBEDDED_TABLES)
    }
}

/// Percentile curves for one metric and sex
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataset {
    metric: Metric,
    sex: Sex,
    points: Vec<PercentileBandSet>,
}

impl ReferenceDataset {
    /// Build from raw SD rows, validating the table
    pub fn from_sd_points(
        metric: Metric,
        sex: Sex,
        raw: &[SdReferencePoint],
    ) -> Result<Self, ReferenceError> {
        let points = build_percentile_bands(metric, sex, raw)?;
        Ok(Self { metric, sex, points })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn points(&self) -> &[PercentileBandSet] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (first age, last age) in months, `None` for an empty table
    pub fn age_range(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.age, self.points.last()?.age))
    }

    /// Percentile bands at `age_months`
    pub fn interpolate(&self, age_months: f64) -> Option<PercentileBandSet> {
        interpolate_bands(&self.points, age_months)
    }

    /// (age, value) series of one band, for chart rendering
    pub fn curve(&self, band: Band) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.age, p.get(band))).collect()
    }
}

/// Read-only store of reference datasets keyed by (metric, sex)
#[derive(Debug, Default)]
pub struct StandardRepository {
    standard: String,
    datasets: FxHashMap<(Metric, Sex), ReferenceDataset>,
}

static SHARED: OnceLock<Arc<StandardRepository>> = OnceLock::new();

impl StandardRepository {
    /// Build from parsed tables
    pub fn from_tables(tables: ReferenceTables) -> Result<Self, ReferenceError> {
        let mut datasets = FxHashMap::default();

        for table in tables.tables {
            let key = (table.metric, table.sex);
            if datasets.contains_key(&key) {
                return Err(ReferenceError::DuplicateTable {
                    metric: table.metric,
                    sex: table.sex,
                });
            }

            let raw: Vec<SdReferencePoint> =
                table.rows.into_iter().map(SdReferencePoint::from_row).collect();
            let dataset = ReferenceDataset::from_sd_points(table.metric, table.sex, &raw)?;

            if dataset.is_empty() {
                tracing::warn!("Reference table {:?}/{:?} has no rows", table.metric, table.sex);
            }
            datasets.insert(key, dataset);
        }

        tracing::info!(
            "Loaded {} reference datasets ({})",
            datasets.len(),
            tables.standard
        );

        Ok(Self {
            standard: tables.standard,
            datasets,
        })
    }

    /// Build from the tables compiled into the crate
    pub fn embedded() -> Result<Self, ReferenceError> {
        Self::from_tables(ReferenceTables::embedded()?)
    }

    /// Load an externalized table file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference tables: {:?}", path))?;

        let tables = ReferenceTables::from_json(&contents)
            .with_context(|| "Failed to parse reference tables JSON")?;

        Self::from_tables(tables)
            .with_context(|| format!("Invalid reference tables in {:?}", path))
    }

    /// Process-wide repository over the embedded tables, built on first use
    ///
    /// # Panics
    /// If the embedded tables are corrupt. They are validated by the test
    /// suite, so this only fires on a broken build.
    pub fn shared() -> Arc<StandardRepository> {
        SHARED
            .get_or_init(|| match Self::embedded() {
                Ok(repository) => Arc::new(repository),
                Err(e) => panic!("embedded reference tables are invalid: {}", e),
            })
            .clone()
    }

    /// Dataset for (metric, sex); `None` when the metric has no reference data
    pub fn dataset(&self, metric: Metric, sex: Sex) -> Option<&ReferenceDataset> {
        self.datasets.get(&(metric, sex))
    }

    /// (metric, sex) pairs backed by data, in stable order
    pub fn supported(&self) -> Vec<(Metric, Sex)> {
        let mut keys: Vec<_> = self.datasets.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn standard(&self) -> &str {
        &self.standard
    }
}
