//! Suggestion Generation
//!
//! Maps status and trend signals to guidance tags. Rules are independent and
//! their outputs concatenate in rule order:
//! - low -> ConsultPediatrician, MonitorDietAndGrowth
//! - high -> ConsultPediatrician (+ ModerateDietAndActivity for weight/BMI)
//! - shift -> RapidGrowthChangeWarning
//! - nothing else and normal -> ReassuringNormalGrowth

use crate::types::{AssessmentResult, GrowthStatus, Metric, SuggestionKind, Suggestions};

fn push_unique(suggestions: &mut Suggestions, kind: SuggestionKind) {
    if !suggestions.contains(&kind) {
        suggestions.push(kind);
    }
}

/// Generate the ordered suggestion list for one assessment
pub fn generate_suggestions(
    metric: Metric,
    result: &AssessmentResult,
    shift_detected: bool,
) -> Suggestions {
    let mut suggestions = Suggestions::new();

    match result.status {
        GrowthStatus::Low => {
            push_unique(&mut suggestions, SuggestionKind::ConsultPediatrician);
            push_unique(&mut suggestions, SuggestionKind::MonitorDietAndGrowth);
        }
        GrowthStatus::High => {
            push_unique(&mut suggestions, SuggestionKind::ConsultPediatrician);
            if metric.is_mass_related() {
                push_unique(&mut suggestions, SuggestionKind::ModerateDietAndActivity);
            }
        }
        GrowthStatus::Normal | GrowthStatus::Unknown => {}
    }

    if shift_detected {
        push_unique(&mut suggestions, SuggestionKind::RapidGrowthChangeWarning);
    }

    if suggestions.is_empty() && result.status == GrowthStatus::Normal {
        suggestions.push(SuggestionKind::ReassuringNormalGrowth);
    }

    suggestions
}
