//! Chart renderer port: Trait for turning assessments into chart descriptions.
//!
//! A chart is a plain numeric description (bands, bars, points, markers) that
//! the website draws. Rasterizing is left to the consumer.

use serde::{Deserialize, Serialize};

use crate::domain::RiskAssessmentResult;

/// Available chart kinds, named as in the `/plot/{kind}` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Score against the category bands
    RiskScore,
    /// Contribution per factor
    Factors,
    /// Projected risk across ages
    Timeline,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::RiskScore, ChartKind::Factors, ChartKind::Timeline];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::RiskScore => "risk_score",
            ChartKind::Factors => "factors",
            ChartKind::Timeline => "timeline",
        }
    }

    /// Look up a kind by its route name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Shaded horizontal interval on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub color: String,
}

/// Horizontal bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Highlighted position, e.g. the patient's own score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub x: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub color: String,
}

/// Complete chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    /// Inclusive x-axis range
    pub x_range: (f64, f64),
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<Band>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bars: Vec<Bar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    /// Colour of the line through `points`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    /// Message shown instead of data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Trait for chart renderers.
///
/// Charts depend only on the assessment, so the same result always renders
/// the same chart.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, kind: ChartKind, result: &RiskAssessmentResult) -> Chart;
}
