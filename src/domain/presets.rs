//! Named example profiles offered by the assessment form.

use std::collections::BTreeMap;

use super::profile::{BreastDensity, MenopausalStatus, PatientProfile};

/// Young, healthy woman with no significant risk factors.
#[must_use]
pub fn low_risk_profile() -> PatientProfile {
    PatientProfile {
        age: 35.0,
        bmi: 22.0,
        family_history: false,
        breast_density: BreastDensity::Low,
        menopausal_status: MenopausalStatus::Premenopausal,
        hormone_use: false,
        previous_biopsies: 0,
        first_menstruation_age: 13.0,
        first_pregnancy_age: Some(28.0),
    }
}

/// Middle-aged woman with some risk factors.
#[must_use]
pub fn moderate_risk_profile() -> PatientProfile {
    PatientProfile {
        age: 52.0,
        bmi: 26.0,
        family_history: false,
        breast_density: BreastDensity::Medium,
        menopausal_status: MenopausalStatus::Postmenopausal,
        hormone_use: true,
        previous_biopsies: 1,
        first_menstruation_age: 12.0,
        first_pregnancy_age: Some(32.0),
    }
}

/// Family history and dense breast tissue.
#[must_use]
pub fn high_risk_profile() -> PatientProfile {
    PatientProfile {
        age: 48.0,
        bmi: 28.0,
        family_history: true,
        breast_density: BreastDensity::High,
        menopausal_status: MenopausalStatus::Premenopausal,
        hormone_use: false,
        previous_biopsies: 2,
        first_menstruation_age: 11.0,
        first_pregnancy_age: None,
    }
}

#[must_use]
pub fn very_high_risk_profile() -> PatientProfile {
    PatientProfile {
        age: 55.0,
        bmi: 32.0,
        family_history: true,
        breast_density: BreastDensity::VeryHigh,
        menopausal_status: MenopausalStatus::Postmenopausal,
        hormone_use: true,
        previous_biopsies: 3,
        first_menstruation_age: 10.0,
        first_pregnancy_age: None,
    }
}

/// All presets keyed by wire name.
#[must_use]
pub fn list_presets() -> BTreeMap<&'static str, PatientProfile> {
    BTreeMap::from([
        ("low_risk", low_risk_profile()),
        ("moderate_risk", moderate_risk_profile()),
        ("high_risk", high_risk_profile()),
        ("very_high_risk", very_high_risk_profile()),
    ])
}
