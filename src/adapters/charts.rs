//! Series renderer: Implementation of ChartRenderer.
//!
//! Produces the three assessment charts as numeric descriptions. Band edges
//! follow the category thresholds the engine scored with.

use crate::domain::calibration::CategoryThresholds;
use crate::domain::{Calibration, RiskAssessmentResult, RiskCategory};
use crate::ports::{Band, Bar, Chart, ChartKind, ChartRenderer, Marker, Point};

/// Ages covered by the timeline projection.
const TIMELINE_AGES: std::ops::Range<u32> = 30..80;

/// Relative change in projected risk per year of age difference.
const TIMELINE_SLOPE_PER_YEAR: f64 = 0.02;

const MARKER_COLOR: &str = "#2ca02c";
const TIMELINE_COLOR: &str = "#d62728";

/// Renders charts from assessment results.
#[derive(Debug, Clone)]
pub struct SeriesRenderer {
    thresholds: CategoryThresholds,
}

impl Default for SeriesRenderer {
    fn default() -> Self {
        Self::for_calibration(Calibration::standard())
    }
}

impl SeriesRenderer {
    #[must_use]
    pub fn new(thresholds: CategoryThresholds) -> Self {
        Self { thresholds }
    }

    /// Renderer whose category bands match the tables an engine scores with.
    #[must_use]
    pub fn for_calibration(calibration: &Calibration) -> Self {
        Self::new(calibration.thresholds)
    }

    fn risk_score_chart(&self, result: &RiskAssessmentResult) -> Chart {
        let bands = RiskCategory::ALL
            .iter()
            .map(|category| {
                let (start, end) = self.thresholds.bounds(*category);
                Band {
                    label: category.label().to_string(),
                    start,
                    end,
                    color: category.color().to_string(),
                }
            })
            .collect();

        Chart {
            kind: ChartKind::RiskScore,
            title: "Breast Cancer Risk Assessment".to_string(),
            x_label: "Risk Score (%)".to_string(),
            y_label: Some("Risk Category".to_string()),
            x_range: (0.0, 100.0),
            bands,
            bars: Vec::new(),
            points: Vec::new(),
            line_color: None,
            markers: vec![Marker {
                label: format!("Your Risk: {:.1}%", result.risk_score),
                x: result.risk_score,
                y: None,
                color: result.risk_category.color().to_string(),
            }],
            note: None,
        }
    }

    fn factors_chart(result: &RiskAssessmentResult) -> Chart {
        let bars: Vec<Bar> = result
            .ranked_factors()
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(factor, value)| Bar {
                label: factor.label(),
                value,
                color: factor_color(value).to_string(),
            })
            .collect();

        let x_max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let note = bars
            .is_empty()
            .then(|| "No significant risk factors identified".to_string());

        Chart {
            kind: ChartKind::Factors,
            title: "Contributing Risk Factors".to_string(),
            x_label: "Risk Contribution (%)".to_string(),
            y_label: None,
            x_range: (0.0, x_max),
            bands: Vec::new(),
            bars,
            points: Vec::new(),
            line_color: None,
            markers: Vec::new(),
            note,
        }
    }

    fn timeline_chart(result: &RiskAssessmentResult) -> Chart {
        let age = result.patient_age;
        let points = TIMELINE_AGES
            .map(|a| {
                let x = f64::from(a);
                let y = result.risk_score * (1.0 + (x - age) * TIMELINE_SLOPE_PER_YEAR);
                Point {
                    x,
                    y: y.clamp(0.0, 100.0),
                }
            })
            .collect();

        Chart {
            kind: ChartKind::Timeline,
            title: "Risk Projection Over Time".to_string(),
            x_label: "Age (years)".to_string(),
            y_label: Some("Estimated Risk (%)".to_string()),
            x_range: (
                f64::from(TIMELINE_AGES.start),
                f64::from(TIMELINE_AGES.end - 1),
            ),
            bands: Vec::new(),
            bars: Vec::new(),
            points,
            line_color: Some(TIMELINE_COLOR.to_string()),
            markers: vec![Marker {
                label: format!("Current Age: {age:.0}, Risk: {:.1}%", result.risk_score),
                x: age,
                y: Some(result.risk_score),
                color: MARKER_COLOR.to_string(),
            }],
            note: None,
        }
    }
}

fn factor_color(value: f64) -> &'static str {
    if value > 10.0 {
        "#ff7f0e"
    } else if value > 5.0 {
        "#ffbb78"
    } else {
        "#2ca02c"
    }
}

impl ChartRenderer for SeriesRenderer {
    fn render(&self, kind: ChartKind, result: &RiskAssessmentResult) -> Chart {
        match kind {
            ChartKind::RiskScore => self.risk_score_chart(result),
            ChartKind::Factors => Self::factors_chart(result),
            ChartKind::Timeline => Self::timeline_chart(result),
        }
    }
}
