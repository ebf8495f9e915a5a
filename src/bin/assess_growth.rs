// Growth assessment binary
//
// Reads `{ "profile": {...}, "records": [...] }` JSON and prints the
// assessment of every record against its predecessors.
// Usage: cargo run --bin assess_growth -- measurements.json

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use growth_scorer_rust::{
    AssessmentConfig, BabyProfile, GrowthAssessor, MeasurementRecord, StandardRepository,
};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
struct AssessmentInput {
    profile: BabyProfile,
    records: Vec<MeasurementRecord>,
}

fn main() -> Result<()> {
    // Initialize tracing (structured logging, stderr so stdout stays JSON)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "growth_scorer_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let input_path = std::env::args()
        .nth(1)
        .context("Usage: assess_growth <measurements.json>")?;

    // Optional overrides from environment variables
    let config = match std::env::var("GROWTH_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading config: {}", path);
            AssessmentConfig::load(Path::new(&path))?
        }
        Err(_) => AssessmentConfig::default(),
    };

    let repository = match std::env::var("REFERENCE_TABLES") {
        Ok(path) => {
            tracing::info!("Loading reference tables: {}", path);
            Arc::new(StandardRepository::load(Path::new(&path))?)
        }
        Err(_) => StandardRepository::shared(),
    };

    let contents = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read input: {}", input_path))?;
    let mut input: AssessmentInput = serde_json::from_str(&contents)
        .with_context(|| "Failed to parse input JSON")?;

    // History assessment expects chronological order
    input.records.sort_by_key(|record| record.date);

    let assessor = GrowthAssessor::with_repository(repository, config);
    let assessments = assessor.assess_history(&input.profile, &input.records);

    let output: Vec<_> = input
        .records
        .iter()
        .zip(assessments)
        .map(|(record, assessment)| {
            serde_json::json!({
                "date": record.date,
                "assessment": assessment,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
