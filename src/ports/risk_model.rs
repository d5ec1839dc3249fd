//! Risk model port: Trait for scoring a patient profile.

use crate::domain::{PatientProfile, RiskAssessmentResult, ValidationError};

/// Trait for breast cancer risk models.
///
/// Implementations must be pure: the same profile always yields the same
/// result, and no state changes between calls.
pub trait RiskModel: Send + Sync {
    /// Validate a profile and compute its full assessment.
    ///
    /// # Errors
    /// Returns `ValidationError` naming the offending field when the profile
    /// violates a range or cross-field constraint. No partial result is
    /// ever produced.
    fn assess(&self, profile: &PatientProfile) -> Result<RiskAssessmentResult, ValidationError>;

    /// Identifier of the tables the model scores with (for logs).
    fn calibration_fingerprint(&self) -> String;
}
