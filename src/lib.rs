//! # Oncobridge
//!
//! Breast cancer risk assessment engine and the HTTP service in front of it.
//!
//! This crate provides:
//! - A calibrated, multiplicative risk model with per-factor decomposition
//! - Screening cadence, percentile and urgency metrics
//! - Chart descriptions for the website's result page
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (profile, assessment, calibration tables)
//! - `ports`: Trait definitions for scoring and charting
//! - `adapters`: Concrete implementations (calibrated engine, charts, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `http`: axum routes and wire format

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod http;
pub mod ports;

pub use domain::{PatientProfile, RiskAssessmentResult, RiskCategory};

/// Result type for Oncobridge operations
pub type Result<T> = std::result::Result<T, OncobridgeError>;

/// Main error type for Oncobridge
#[derive(Debug, thiserror::Error)]
pub enum OncobridgeError {
    #[error("Invalid patient data: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] domain::ConfigurationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
