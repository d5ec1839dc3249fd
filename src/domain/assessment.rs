//! Risk assessment result types.
//!
//! Represents the output of the breast cancer risk engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Risk category, bucketed from the score by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskCategory {
    /// All categories in ascending severity.
    pub const ALL: [RiskCategory; 4] = [Self::Low, Self::Moderate, Self::High, Self::VeryHigh];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    /// Human-readable label used in charts.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Display colour as a hex string.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#2ca02c",
            Self::Moderate => "#ffbb78",
            Self::High => "#ff7f0e",
            Self::VeryHigh => "#d62728",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named contributor to the risk score.
///
/// Serialized as the snake_case key used in `contributing_factors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// Age-only baseline incidence
    Age,
    Bmi,
    FamilyHistory,
    BreastDensity,
    HormoneUse,
    PreviousBiopsies,
    EarlyMenstruation,
    LatePregnancy,
    NoPregnancy,
}

impl RiskFactor {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Bmi => "bmi",
            Self::FamilyHistory => "family_history",
            Self::BreastDensity => "breast_density",
            Self::HormoneUse => "hormone_use",
            Self::PreviousBiopsies => "previous_biopsies",
            Self::EarlyMenstruation => "early_menstruation",
            Self::LatePregnancy => "late_pregnancy",
            Self::NoPregnancy => "no_pregnancy",
        }
    }

    /// Title-cased label, e.g. `family_history` -> `Family History`.
    #[must_use]
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Complete output of one assessment. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResult {
    /// Calibrated absolute risk estimate (0-100)
    pub risk_score: f64,

    pub risk_category: RiskCategory,

    /// Percentage-point contribution per factor; values sum to `risk_score`.
    pub contributing_factors: BTreeMap<RiskFactor, f64>,

    /// Ordered clinical directives
    pub recommendations: Vec<String>,

    /// Position of `risk_score` in the reference population (0-100)
    pub percentile_rank: f64,

    /// Recommended screening interval
    pub screening_frequency_months: u32,

    /// Secondary triage signal (0-1)
    pub urgency_score: f64,

    /// Echo of the input age
    pub patient_age: f64,
}

impl RiskAssessmentResult {
    /// Sum of all factor contributions.
    #[must_use]
    pub fn factor_total(&self) -> f64 {
        self.contributing_factors.values().sum()
    }

    /// Factors sorted by contribution, largest first.
    #[must_use]
    pub fn ranked_factors(&self) -> Vec<(RiskFactor, f64)> {
        let mut ranked: Vec<_> = self
            .contributing_factors
            .iter()
            .map(|(factor, value)| (*factor, *value))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_labels() {
        assert_eq!(RiskFactor::FamilyHistory.label(), "Family History");
        assert_eq!(RiskFactor::Bmi.label(), "Bmi");
        assert_eq!(RiskFactor::Age.label(), "Age");
    }

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&RiskCategory::VeryHigh).expect("Should serialize");
        assert_eq!(json, "\"very_high\"");
        assert_eq!(RiskCategory::VeryHigh.to_string(), "very_high");
        assert!(RiskCategory::Low < RiskCategory::VeryHigh);
    }

    #[test]
    fn test_factor_map_keys() {
        let mut factors = BTreeMap::new();
        factors.insert(RiskFactor::NoPregnancy, 2.5);
        factors.insert(RiskFactor::Age, 4.0);
        let json = serde_json::to_string(&factors).expect("Should serialize");
        assert_eq!(json, r#"{"age":4.0,"no_pregnancy":2.5}"#);
    }

    #[test]
    fn test_ranked_factors() {
        let mut factors = BTreeMap::new();
        factors.insert(RiskFactor::Age, 4.0);
        factors.insert(RiskFactor::FamilyHistory, 9.0);
        factors.insert(RiskFactor::Bmi, 1.0);
        let result = RiskAssessmentResult {
            risk_score: 14.0,
            risk_category: RiskCategory::Low,
            contributing_factors: factors,
            recommendations: vec![],
            percentile_rank: 60.0,
            screening_frequency_months: 36,
            urgency_score: 0.28,
            patient_age: 30.0,
        };

        let ranked = result.ranked_factors();
        assert_eq!(ranked[0].0, RiskFactor::FamilyHistory);
        assert_eq!(ranked[2].0, RiskFactor::Bmi);
        assert!((result.factor_total() - 14.0).abs() < 1e-12);
    }
}
