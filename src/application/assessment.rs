//! Assessment service: Orchestrates risk scoring and charting.
//!
//! Logs carry the category, score and calibration fingerprint only. Profile
//! values never reach a log line from here.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{self, PatientProfile, RiskAssessmentResult};
use crate::ports::{Chart, ChartKind, ChartRenderer, RiskModel};
use crate::OncobridgeError;

/// Service for running assessments.
///
/// Holds no per-request state; one instance is shared by every handler.
pub struct AssessmentService<M, R>
where
    M: RiskModel,
    R: ChartRenderer,
{
    model: Arc<M>,
    renderer: Arc<R>,
    fingerprint: Arc<str>,
}

impl<M, R> Clone for AssessmentService<M, R>
where
    M: RiskModel,
    R: ChartRenderer,
{
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            renderer: Arc::clone(&self.renderer),
            fingerprint: Arc::clone(&self.fingerprint),
        }
    }
}

impl<M, R> AssessmentService<M, R>
where
    M: RiskModel,
    R: ChartRenderer,
{
    /// Create a new assessment service.
    pub fn new(model: Arc<M>, renderer: Arc<R>) -> Self {
        let fingerprint: Arc<str> = model.calibration_fingerprint().into();
        tracing::info!("Assessment service ready (calibration={})", fingerprint);
        Self {
            model,
            renderer,
            fingerprint,
        }
    }

    /// Assess a profile.
    ///
    /// # Errors
    /// Returns `OncobridgeError::Validation` if the profile is invalid.
    pub fn assess(&self, profile: &PatientProfile) -> Result<RiskAssessmentResult, OncobridgeError> {
        let result = self.model.assess(profile).map_err(|e| {
            tracing::debug!("Rejected profile: field={}", e.field());
            e
        })?;

        tracing::info!(
            "Assessment complete: category={}, score={:.2}, calibration={}",
            result.risk_category,
            result.risk_score,
            self.fingerprint
        );

        Ok(result)
    }

    /// Assess a profile and render one chart of the result.
    ///
    /// # Errors
    /// Returns `OncobridgeError::Validation` if the profile is invalid.
    pub fn chart(&self, kind: ChartKind, profile: &PatientProfile) -> Result<Chart, OncobridgeError> {
        let result = self.assess(profile)?;
        tracing::debug!("Rendering {:?} chart", kind);
        Ok(self.renderer.render(kind, &result))
    }

    /// Named example profiles.
    #[must_use]
    pub fn presets(&self) -> BTreeMap<&'static str, PatientProfile> {
        domain::list_presets()
    }

    /// SHA-256 fingerprint of the calibration in use.
    #[must_use]
    pub fn calibration_fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
