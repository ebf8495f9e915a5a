//! Core value types shared across the engine
//!
//! Metrics, sexes, percentile bands, assessment results and suggestion tags.
//! Everything here is a plain value object: no identity, no interior state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Anthropometric indicator assessed against a reference standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    WeightForAge,
    HeightForAge,
    HeadForAge,
    /// Recognised, but no reference table ships for it yet
    BmiForAge,
    /// Recognised, but no reference table ships for it yet
    WeightForHeight,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::WeightForAge,
        Metric::HeightForAge,
        Metric::HeadForAge,
        Metric::BmiForAge,
        Metric::WeightForHeight,
    ];

    /// Unit of the measured value
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::WeightForAge | Metric::WeightForHeight => "kg",
            Metric::HeightForAge | Metric::HeadForAge => "cm",
            Metric::BmiForAge => "kg/m²",
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Metric::WeightForAge => "Weight-for-age",
            Metric::HeightForAge => "Length/height-for-age",
            Metric::HeadForAge => "Head circumference-for-age",
            Metric::BmiForAge => "BMI-for-age",
            Metric::WeightForHeight => "Weight-for-length/height",
        }
    }

    /// Metrics where an above-range result suggests moderating intake
    pub fn is_mass_related(&self) -> bool {
        matches!(self, Metric::WeightForAge | Metric::BmiForAge)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// One of the seven canonical percentile curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    P3,
    P10,
    P25,
    P50,
    P75,
    P90,
    P97,
}

impl Band {
    pub const ALL: [Band; 7] = [
        Band::P3,
        Band::P10,
        Band::P25,
        Band::P50,
        Band::P75,
        Band::P90,
        Band::P97,
    ];

    /// Percentile rank of the curve (0-100)
    pub fn rank(&self) -> f64 {
        match self {
            Band::P3 => 3.0,
            Band::P10 => 10.0,
            Band::P25 => 25.0,
            Band::P50 => 50.0,
            Band::P75 => 75.0,
            Band::P90 => 90.0,
            Band::P97 => 97.0,
        }
    }

    fn index(&self) -> usize {
        match self {
            Band::P3 => 0,
            Band::P10 => 1,
            Band::P25 => 2,
            Band::P50 => 3,
            Band::P75 => 4,
            Band::P90 => 5,
            Band::P97 => 6,
        }
    }
}

/// Percentile curve values at a single age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileBandSet {
    /// Age in months
    pub age: f64,
    pub p3: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p97: f64,
}

impl PercentileBandSet {
    /// Build from values ordered P3..P97
    pub fn from_values(age: f64, values: [f64; 7]) -> Self {
        let [p3, p10, p25, p50, p75, p90, p97] = values;
        Self { age, p3, p10, p25, p50, p75, p90, p97 }
    }

    /// Values ordered P3..P97
    pub fn values(&self) -> [f64; 7] {
        [self.p3, self.p10, self.p25, self.p50, self.p75, self.p90, self.p97]
    }

    pub fn get(&self, band: Band) -> f64 {
        self.values()[band.index()]
    }

    /// P3 <= P10 <= ... <= P97
    pub fn is_monotonic(&self) -> bool {
        self.values().windows(2).all(|w| w[0] <= w[1])
    }
}

/// A single measured value at a known age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub age_months: f64,
    pub value: f64,
}

/// Classification of a percentile estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStatus {
    /// Below the 3rd percentile
    Low,
    /// Between the 3rd and 97th percentile, both inclusive
    Normal,
    /// Above the 97th percentile
    High,
    /// No reference data to compare against
    Unknown,
}

impl GrowthStatus {
    pub const LOW_CUTOFF: f64 = 3.0;
    pub const HIGH_CUTOFF: f64 = 97.0;

    pub fn from_percentile(percentile: f64) -> Self {
        if percentile < Self::LOW_CUTOFF {
            GrowthStatus::Low
        } else if percentile > Self::HIGH_CUTOFF {
            GrowthStatus::High
        } else {
            GrowthStatus::Normal
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            GrowthStatus::Low => "Low",
            GrowthStatus::Normal => "Normal",
            GrowthStatus::High => "High",
            GrowthStatus::Unknown => "Unknown",
        }
    }
}

/// Language-neutral description template
///
/// The presentation layer resolves these into localized text; `display_text`
/// is only the English fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum Description {
    /// "below approximately {percent}% of peers"
    BelowPeers { percent: u8 },
    /// "above approximately {percent}% of peers"
    AbovePeers { percent: u8 },
    Unavailable,
}

impl Description {
    pub fn display_text(&self) -> String {
        match self {
            Description::BelowPeers { percent } => {
                format!("Below approximately {}% of peers", percent)
            }
            Description::AbovePeers { percent } => {
                format!("Above approximately {}% of peers", percent)
            }
            Description::Unavailable => "No reference data available for this age".to_string(),
        }
    }
}

/// Outcome of placing one measurement within its reference distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub age_months: f64,
    pub value: f64,
    /// Estimated percentile in [0, 100]; `None` when no reference data exists
    pub percentile: Option<f64>,
    pub status: GrowthStatus,
    pub description: Description,
}

impl AssessmentResult {
    pub fn unknown(age_months: f64, value: f64) -> Self {
        Self {
            age_months,
            value,
            percentile: None,
            status: GrowthStatus::Unknown,
            description: Description::Unavailable,
        }
    }
}

/// Guidance tag; rendering to text is left to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    ConsultPediatrician,
    MonitorDietAndGrowth,
    ModerateDietAndActivity,
    RapidGrowthChangeWarning,
    ReassuringNormalGrowth,
}

impl SuggestionKind {
    pub fn display_text(&self) -> &'static str {
        match self {
            SuggestionKind::ConsultPediatrician => {
                "Consider discussing this measurement with a pediatrician"
            }
            SuggestionKind::MonitorDietAndGrowth => {
                "Keep an eye on feeding and track growth closely"
            }
            SuggestionKind::ModerateDietAndActivity => {
                "Review diet balance and encourage age-appropriate activity"
            }
            SuggestionKind::RapidGrowthChangeWarning => {
                "Percentile changed sharply since the last measurement"
            }
            SuggestionKind::ReassuringNormalGrowth => "Growth is within the typical range",
        }
    }
}

/// Ordered suggestion list (at most four entries under the current rules)
pub type Suggestions = SmallVec<[SuggestionKind; 4]>;

/// Assessment result with the guidance derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub result: AssessmentResult,
    /// Whether the percentile shifted sharply against the previous measurement
    pub shift_detected: bool,
    pub suggestions: Suggestions,
}
