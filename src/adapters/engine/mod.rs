//! Calibrated risk engine: Implementation of RiskModel.
//!
//! Scores a profile as an age-stratified baseline incidence scaled by
//! relative-risk multipliers, mapped through a saturating curve into [0, 100].
//!
//! # Decomposition
//!
//! `contributing_factors` explains the score additively:
//! - `age` receives the baseline-only score
//! - every other active factor receives the score gain of switching on that
//!   factor alone against the baseline
//! - the non-age gains are rescaled so that all contributions sum to the
//!   final score (interaction effects are shared proportionally)
//!
//! The score is rounded to [`SCORE_DECIMALS`] places before anything is
//! derived from it, so the published score always sits in the published
//! category.
//!
//! # Thread Safety
//!
//! The engine only reads its calibration tables, which are shared behind an
//! `Arc` and never mutated, so one instance can serve any number of callers.

mod recommendations;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{
    Calibration, ConfigurationError, PatientProfile, RiskAssessmentResult, RiskFactor,
    ValidationError,
};
use crate::ports::RiskModel;

/// Decimal places kept on the risk score.
pub const SCORE_DECIMALS: i32 = 2;

fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}

/// Breast cancer risk engine backed by calibration tables.
#[derive(Debug, Clone)]
pub struct CalibratedRiskEngine {
    calibration: Arc<Calibration>,
}

impl Default for CalibratedRiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibratedRiskEngine {
    /// Create an engine using the compiled-in tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calibration: Arc::new(Calibration::standard().clone()),
        }
    }

    /// Create an engine with custom tables.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if the tables break an invariant.
    pub fn with_calibration(calibration: Calibration) -> Result<Self, ConfigurationError> {
        calibration.validate()?;
        Ok(Self {
            calibration: Arc::new(calibration),
        })
    }

    /// Create an engine from a calibration JSON file.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if the file is missing, malformed or invalid.
    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        let calibration = Calibration::load(path)?;
        Ok(Self {
            calibration: Arc::new(calibration),
        })
    }

    #[must_use]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Relative-risk multiplier of every factor that applies to this profile.
    ///
    /// Factors at their neutral value are omitted.
    fn factor_terms(&self, profile: &PatientProfile) -> Vec<(RiskFactor, f64)> {
        let m = &self.calibration.multipliers;
        let mut terms = Vec::with_capacity(7);

        let bmi_curve = if profile.menopausal_status.is_postmenopausal() {
            &m.bmi_postmenopausal
        } else {
            &m.bmi_premenopausal
        };
        terms.push((RiskFactor::Bmi, bmi_curve.multiplier(profile.bmi)));

        if profile.family_history {
            terms.push((RiskFactor::FamilyHistory, m.family_history));
        }

        terms.push((
            RiskFactor::BreastDensity,
            m.density.for_density(profile.breast_density),
        ));

        // HRT has no modelled effect before menopause.
        if profile.hormone_use && profile.menopausal_status.is_postmenopausal() {
            terms.push((RiskFactor::HormoneUse, m.hormone_use_postmenopausal));
        }

        let biopsies = profile.previous_biopsies.min(m.biopsy_cap);
        terms.push((
            RiskFactor::PreviousBiopsies,
            1.0 + m.biopsy_step * f64::from(biopsies),
        ));

        let early_years = (m.early_menarche_age - profile.first_menstruation_age).max(0.0);
        terms.push((
            RiskFactor::EarlyMenstruation,
            1.0 + m.early_menarche_step * early_years,
        ));

        match profile.first_pregnancy_age {
            None => terms.push((RiskFactor::NoPregnancy, m.nulliparity)),
            Some(age) if age > m.late_pregnancy_age => {
                terms.push((RiskFactor::LatePregnancy, m.late_pregnancy));
            }
            Some(_) => {}
        }

        terms.retain(|(_, multiplier)| *multiplier > 1.0);
        terms
    }

    /// Split `score` into per-factor contributions that sum to it.
    fn decompose(
        &self,
        baseline: f64,
        score: f64,
        terms: &[(RiskFactor, f64)],
    ) -> BTreeMap<RiskFactor, f64> {
        let cal = &self.calibration;
        let baseline_score = cal.saturate(baseline);

        let deltas: Vec<(RiskFactor, f64)> = terms
            .iter()
            .map(|(factor, multiplier)| {
                (*factor, cal.saturate(baseline * multiplier) - baseline_score)
            })
            .filter(|(_, delta)| *delta > 0.0)
            .collect();

        // Rounding can leave the score just under the baseline score.
        let mut factors = BTreeMap::new();
        factors.insert(RiskFactor::Age, baseline_score.min(score));

        let excess = (score - baseline_score).max(0.0);
        let total: f64 = deltas.iter().map(|(_, delta)| delta).sum();
        if excess > 0.0 && total > 0.0 {
            let scale = excess / total;
            for (factor, delta) in deltas {
                factors.insert(factor, delta * scale);
            }
        }
        factors
    }

    /// Triage signal: score relative to the full-urgency score, boosted by
    /// biopsy history and capped at 1.
    fn urgency(&self, score: f64, profile: &PatientProfile) -> f64 {
        let u = &self.calibration.urgency;
        let biopsies = f64::from(profile.previous_biopsies.min(u.biopsy_cap));
        (score / u.full_urgency_score * (1.0 + u.biopsy_weight * biopsies)).clamp(0.0, 1.0)
    }
}

impl RiskModel for CalibratedRiskEngine {
    fn assess(&self, profile: &PatientProfile) -> Result<RiskAssessmentResult, ValidationError> {
        profile.validate()?;
        let cal = &self.calibration;

        let baseline = cal.baseline_for(profile.age);
        let terms = self.factor_terms(profile);
        let raw = terms
            .iter()
            .fold(baseline, |acc, (_, multiplier)| acc * multiplier);
        let risk_score = round_score(cal.saturate(raw));

        let risk_category = cal.thresholds.categorize(risk_score);
        let screening_frequency_months = cal
            .screening
            .cadence(risk_category)
            .months_for_age(profile.age);

        Ok(RiskAssessmentResult {
            risk_score,
            risk_category,
            contributing_factors: self.decompose(baseline, risk_score, &terms),
            recommendations: recommendations::recommend(
                profile,
                risk_category,
                screening_frequency_months,
            ),
            percentile_rank: cal.percentile_for(risk_score),
            screening_frequency_months,
            urgency_score: self.urgency(risk_score, profile),
            patient_age: profile.age,
        })
    }

    fn calibration_fingerprint(&self) -> String {
        self.calibration.fingerprint()
    }
}
