//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundaries between the application and the
//! scoring model and chart renderer implementations.

mod chart_renderer;
mod risk_model;

pub use chart_renderer::{Band, Bar, Chart, ChartKind, ChartRenderer, Marker, Point};
pub use risk_model::RiskModel;
