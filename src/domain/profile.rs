//! Patient profile types for breast cancer risk assessment.
//!
//! Field names and enum spellings are the wire contract shared with the
//! website's assessment form and must not change.

use serde::{Deserialize, Serialize};

/// Mammographic breast density category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreastDensity {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl BreastDensity {
    /// All densities, from least to most dense.
    pub const ALL: [BreastDensity; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

/// Menopausal status at the time of assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenopausalStatus {
    Premenopausal,
    Postmenopausal,
}

impl MenopausalStatus {
    #[must_use]
    pub fn is_postmenopausal(&self) -> bool {
        matches!(self, Self::Postmenopausal)
    }
}

/// Patient attributes submitted for a single assessment.
///
/// A profile carries no identity: it is built per request, passed once into
/// the engine and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years (18-100)
    pub age: f64,

    /// Body mass index in kg/m² (15-60)
    pub bmi: f64,

    /// First-degree relative with breast cancer
    pub family_history: bool,

    /// Mammographic density category
    pub breast_density: BreastDensity,

    pub menopausal_status: MenopausalStatus,

    /// Current or past hormone replacement therapy
    pub hormone_use: bool,

    /// Number of previous breast biopsies (0-10)
    pub previous_biopsies: u32,

    /// Age at menarche in years (8-20)
    pub first_menstruation_age: f64,

    /// Age at first live birth (12-60), `None` when nulliparous or unknown.
    #[serde(default)]
    pub first_pregnancy_age: Option<f64>,
}

pub(crate) const AGE_RANGE: (f64, f64) = (18.0, 100.0);
pub(crate) const BMI_RANGE: (f64, f64) = (15.0, 60.0);
pub(crate) const MAX_BIOPSIES: u32 = 10;
pub(crate) const MENARCHE_RANGE: (f64, f64) = (8.0, 20.0);
pub(crate) const FIRST_PREGNANCY_RANGE: (f64, f64) = (12.0, 60.0);

/// A profile field violating its constraint.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error(
        "first_pregnancy_age ({first_pregnancy_age}) must not be earlier than first_menstruation_age ({first_menstruation_age})"
    )]
    PregnancyBeforeMenarche {
        first_pregnancy_age: f64,
        first_menstruation_age: f64,
    },
}

impl ValidationError {
    /// Name of the offending wire field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotFinite { field } | Self::OutOfRange { field, .. } => field,
            Self::PregnancyBeforeMenarche { .. } => "first_pregnancy_age",
        }
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

impl PatientProfile {
    /// Check every field constraint, then the menarche/pregnancy ordering.
    ///
    /// Fields are checked in wire order and the first violation is returned.
    ///
    /// # Errors
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("age", self.age, AGE_RANGE)?;
        check_range("bmi", self.bmi, BMI_RANGE)?;
        if self.previous_biopsies > MAX_BIOPSIES {
            return Err(ValidationError::OutOfRange {
                field: "previous_biopsies",
                min: 0.0,
                max: f64::from(MAX_BIOPSIES),
                value: f64::from(self.previous_biopsies),
            });
        }
        check_range(
            "first_menstruation_age",
            self.first_menstruation_age,
            MENARCHE_RANGE,
        )?;

        if let Some(pregnancy) = self.first_pregnancy_age {
            check_range("first_pregnancy_age", pregnancy, FIRST_PREGNANCY_RANGE)?;
            if pregnancy < self.first_menstruation_age {
                return Err(ValidationError::PregnancyBeforeMenarche {
                    first_pregnancy_age: pregnancy,
                    first_menstruation_age: self.first_menstruation_age,
                });
            }
        }

        Ok(())
    }

    /// True when no first pregnancy is recorded.
    #[must_use]
    pub fn is_nulliparous(&self) -> bool {
        self.first_pregnancy_age.is_none()
    }
}
