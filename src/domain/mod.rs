//! Domain layer: Core business types and logic.
//!
//! Pure types with strict validation. Everything here is serializable and
//! free of I/O, apart from loading calibration files.

mod assessment;
pub mod calibration;
pub mod presets;
mod profile;

pub use assessment::{RiskAssessmentResult, RiskCategory, RiskFactor};
pub use calibration::{Calibration, ConfigurationError};
pub use presets::list_presets;
pub use profile::{BreastDensity, MenopausalStatus, PatientProfile, ValidationError};

#[cfg(test)]
pub(crate) use profile::fixtures;
