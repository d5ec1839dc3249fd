//! Adapters layer: Concrete implementations of ports.
//!
//! - `engine`: Calibrated multiplicative risk model
//! - `charts`: Chart descriptions for the website
//! - `sanitize`: PII filtering for logs

pub mod charts;
pub mod engine;
pub mod sanitize;

pub use charts::SeriesRenderer;
pub use engine::CalibratedRiskEngine;
