//! Wire format for the website.
//!
//! The result page reads the derived metrics from a nested `metrics` object,
//! and every fractional number is rounded to two decimals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{PatientProfile, RiskAssessmentResult, RiskCategory, RiskFactor};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDto {
    pub percentile_rank: f64,
    pub screening_frequency_months: u32,
    pub urgency_score: f64,
}

/// Body of a successful `POST /assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub contributing_factors: BTreeMap<RiskFactor, f64>,
    pub recommendations: Vec<String>,
    pub metrics: MetricsDto,
    pub patient_age: f64,
}

impl From<RiskAssessmentResult> for AssessmentResponse {
    fn from(result: RiskAssessmentResult) -> Self {
        Self {
            risk_score: round2(result.risk_score),
            risk_category: result.risk_category,
            contributing_factors: result
                .contributing_factors
                .into_iter()
                .map(|(factor, value)| (factor, round2(value)))
                .collect(),
            recommendations: result.recommendations,
            metrics: MetricsDto {
                percentile_rank: round2(result.percentile_rank),
                screening_frequency_months: result.screening_frequency_months,
                urgency_score: round2(result.urgency_score),
            },
            patient_age: result.patient_age,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub presets: BTreeMap<&'static str, PatientProfile>,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::engine::CalibratedRiskEngine;
    use crate::domain::fixtures::adverse;
    use crate::ports::RiskModel;

    #[test]
    fn test_round2() {
        assert_eq!(round2(26.604_9), 26.6);
        assert_eq!(round2(3.927), 3.93);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_metrics_nested_on_the_wire() {
        let result = CalibratedRiskEngine::new()
            .assess(&adverse())
            .expect("Should assess");
        let months = result.screening_frequency_months;
        let json = serde_json::to_value(AssessmentResponse::from(result)).expect("Should serialize");

        assert_eq!(json["risk_category"], "very_high");
        assert_eq!(json["metrics"]["screening_frequency_months"], months);
        assert!(json["metrics"]["percentile_rank"].is_number());
        assert!(json.get("percentile_rank").is_none());
        assert!(json["contributing_factors"]["family_history"].is_number());
    }

    #[test]
    fn test_values_rounded() {
        let result = CalibratedRiskEngine::new()
            .assess(&adverse())
            .expect("Should assess");
        let response = AssessmentResponse::from(result);
        let scaled = response.risk_score * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
        for value in response.contributing_factors.values() {
            let scaled = value * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}
