//! Growth Assessor - Main coordinator for assessing measurement records
//!
//! Runs interpolation, classification, trend detection and suggestion
//! generation for weight, height and head circumference independently.
//! Includes both single-record and parallel (Rayon) history implementations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assessment::{classify_measurement, detect_shift_with, generate_suggestions};
use crate::config::AssessmentConfig;
use crate::data::StandardRepository;
use crate::types::{AssessmentResult, Measurement, Metric, Sex, SuggestionSet};

/// Metrics assessed for every record, in output order
pub const ASSESSED_METRICS: [Metric; 3] =
    [Metric::WeightForAge, Metric::HeightForAge, Metric::HeadForAge];

/// Child the measurements belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyProfile {
    pub birth_date: DateTime<Utc>,
    pub sex: Sex,
}

/// One measurement session; any field may be missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub date: DateTime<Utc>,
    /// kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// cm
    #[serde(default)]
    pub height: Option<f64>,
    /// cm
    #[serde(default)]
    pub head_circumference: Option<f64>,
}

impl MeasurementRecord {
    /// Measured value for `metric`, if recorded
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::WeightForAge => self.weight,
            Metric::HeightForAge => self.height,
            Metric::HeadForAge => self.head_circumference,
            Metric::BmiForAge | Metric::WeightForHeight => None,
        }
    }
}

/// Per-metric results for one record
///
/// Metrics without a measured value (or without reference data) are absent
/// and left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<SuggestionSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<SuggestionSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<SuggestionSet>,
}

impl GrowthAssessment {
    pub fn get(&self, metric: Metric) -> Option<&SuggestionSet> {
        match metric {
            Metric::WeightForAge => self.weight.as_ref(),
            Metric::HeightForAge => self.height.as_ref(),
            Metric::HeadForAge => self.head.as_ref(),
            Metric::BmiForAge | Metric::WeightForHeight => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_none() && self.height.is_none() && self.head.is_none()
    }
}

/// Age in fractional months: whole elapsed days / `days_per_month`
///
/// Dates before the birth date clamp to 0.
pub fn age_in_months(birth_date: DateTime<Utc>, at: DateTime<Utc>, days_per_month: f64) -> f64 {
    let days = (at - birth_date).num_days() as f64;
    (days / days_per_month).max(0.0)
}

/// Main growth assessor
pub struct GrowthAssessor {
    repository: Arc<StandardRepository>,
    config: AssessmentConfig,
}

impl Default for GrowthAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthAssessor {
    /// Assessor over the shared embedded tables with default settings
    pub fn new() -> Self {
        Self::with_repository(StandardRepository::shared(), AssessmentConfig::default())
    }

    pub fn with_repository(repository: Arc<StandardRepository>, config: AssessmentConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &StandardRepository {
        &self.repository
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    fn age_at(&self, profile: &BabyProfile, record: &MeasurementRecord) -> f64 {
        age_in_months(profile.birth_date, record.date, self.config.days_per_month)
    }

    /// Assess one metric of one record
    ///
    /// `None` when the record has no value for the metric or the metric has
    /// no reference data for the child's sex.
    pub fn assess_metric(
        &self,
        metric: Metric,
        profile: &BabyProfile,
        record: &MeasurementRecord,
        prior_records: &[MeasurementRecord],
    ) -> Option<SuggestionSet> {
        let value = record.value(metric)?;

        let Some(dataset) = self.repository.dataset(metric, profile.sex) else {
            tracing::debug!("No reference data for {:?}/{:?}", metric, profile.sex);
            return None;
        };

        let result = classify_measurement(
            dataset,
            Measurement {
                age_months: self.age_at(profile, record),
                value,
            },
        );

        let prior_results: Vec<AssessmentResult> = prior_records
            .iter()
            .filter_map(|prior| {
                let value = prior.value(metric)?;
                Some(classify_measurement(
                    dataset,
                    Measurement {
                        age_months: self.age_at(profile, prior),
                        value,
                    },
                ))
            })
            .collect();

        let shift_detected = detect_shift_with(&result, &prior_results, &self.config);
        let suggestions = generate_suggestions(metric, &result, shift_detected);

        tracing::debug!(
            "{:?} at {:.2} months: value {} -> percentile {:?} ({:?}), shift: {}",
            metric,
            result.age_months,
            value,
            result.percentile,
            result.status,
            shift_detected
        );

        Some(SuggestionSet {
            result,
            shift_detected,
            suggestions,
        })
    }

    /// Assess every metric present in `record`
    ///
    /// `prior_records` are the child's earlier records in chronological
    /// order; each metric uses only the records that carry it.
    pub fn assess(
        &self,
        profile: &BabyProfile,
        record: &MeasurementRecord,
        prior_records: &[MeasurementRecord],
    ) -> GrowthAssessment {
        let [weight, height, head] = ASSESSED_METRICS
            .map(|metric| self.assess_metric(metric, profile, record, prior_records));

        GrowthAssessment { weight, height, head }
    }

    /// Assess each record against the records before it (parallel)
    ///
    /// `records` must be in chronological order. Output order matches input.
    pub fn assess_history(
        &self,
        profile: &BabyProfile,
        records: &[MeasurementRecord],
    ) -> Vec<GrowthAssessment> {
        tracing::info!("Assessing {} records", records.len());

        records
            .par_iter()
            .enumerate()
            .map(|(i, record)| self.assess(profile, record, &records[..i]))
            .collect()
    }
}
