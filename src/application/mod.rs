//! Application layer: Use cases and services.
//!
//! Orchestrates the domain with the ports to implement the assessment use
//! cases served over HTTP.

mod assessment;

pub use assessment::AssessmentService;
