//! Calibration tables for the breast cancer risk model.
//!
//! Every constant the engine uses (age baselines, relative-risk multipliers,
//! category thresholds, the reference percentile curve, screening cadences and
//! urgency weights) lives in a single [`Calibration`] value. A standard set is
//! compiled in; deployments may replace it with a JSON file, which is validated
//! once at startup. Tables are read-only after loading.
//!
//! The coefficients are a policy choice pending clinical sign-off. They encode
//! the required shape (monotone baseline, multipliers never below 1, density
//! strictly increasing, steeper BMI effect after menopause, saturating biopsy
//! effect) rather than a fitted model.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::assessment::RiskCategory;
use super::profile::{BreastDensity, AGE_RANGE, BMI_RANGE};

/// Only supported calibration file format.
pub const CALIBRATION_VERSION: u32 = 1;

static STANDARD: OnceLock<Calibration> = OnceLock::new();

/// Errors raised while loading calibration tables or service settings.
///
/// Always fatal: a service without valid tables must not start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to read calibration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed calibration tables: {0}")]
    Malformed(String),

    #[error("Invalid calibration table `{table}`: {reason}")]
    Invalid { table: &'static str, reason: String },

    #[error("Invalid setting {name}: {reason}")]
    Setting { name: &'static str, reason: String },
}

/// Baseline incidence for ages from `min_age` up to the next band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBand {
    pub min_age: f64,
    /// Percentage points
    pub baseline: f64,
}

/// Linear relative-risk increase above a BMI knee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiCurve {
    pub knee: f64,
    pub slope_per_unit: f64,
}

impl BmiCurve {
    #[must_use]
    pub fn multiplier(&self, bmi: f64) -> f64 {
        1.0 + self.slope_per_unit * (bmi - self.knee).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub very_high: f64,
}

impl DensityMultipliers {
    #[must_use]
    pub fn for_density(&self, density: BreastDensity) -> f64 {
        match density {
            BreastDensity::Low => self.low,
            BreastDensity::Medium => self.medium,
            BreastDensity::High => self.high,
            BreastDensity::VeryHigh => self.very_high,
        }
    }
}

/// Relative-risk multipliers applied on top of the age baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorMultipliers {
    pub family_history: f64,
    pub density: DensityMultipliers,
    pub bmi_premenopausal: BmiCurve,
    pub bmi_postmenopausal: BmiCurve,
    /// Applied only when postmenopausal
    pub hormone_use_postmenopausal: f64,
    /// Added per biopsy up to `biopsy_cap`
    pub biopsy_step: f64,
    pub biopsy_cap: u32,
    /// Menarche strictly before this age counts as early
    pub early_menarche_age: f64,
    /// Added per year of menarche before `early_menarche_age`
    pub early_menarche_step: f64,
    /// First pregnancy strictly after this age counts as late
    pub late_pregnancy_age: f64,
    pub late_pregnancy: f64,
    pub nulliparity: f64,
}

/// Lower bounds of the three upper categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
}

impl CategoryThresholds {
    /// Bucket a score. Each threshold belongs to the category above it.
    #[must_use]
    pub fn categorize(&self, score: f64) -> RiskCategory {
        if score < self.moderate {
            RiskCategory::Low
        } else if score < self.high {
            RiskCategory::Moderate
        } else if score < self.very_high {
            RiskCategory::High
        } else {
            RiskCategory::VeryHigh
        }
    }

    /// Score interval `[lower, upper)` covered by a category.
    #[must_use]
    pub fn bounds(&self, category: RiskCategory) -> (f64, f64) {
        match category {
            RiskCategory::Low => (0.0, self.moderate),
            RiskCategory::Moderate => (self.moderate, self.high),
            RiskCategory::High => (self.high, self.very_high),
            RiskCategory::VeryHigh => (self.very_high, 100.0),
        }
    }
}

/// One point of the reference population CDF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub score: f64,
    pub percentile: f64,
}

/// Screening interval for one category, shortened from a given age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreeningCadence {
    pub months: u32,
    pub tightened_months: u32,
    pub tighten_from_age: f64,
}

impl ScreeningCadence {
    #[must_use]
    pub fn months_for_age(&self, age: f64) -> u32 {
        if age >= self.tighten_from_age {
            self.tightened_months
        } else {
            self.months
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreeningTable {
    pub low: ScreeningCadence,
    pub moderate: ScreeningCadence,
    pub high: ScreeningCadence,
    pub very_high: ScreeningCadence,
}

impl ScreeningTable {
    #[must_use]
    pub fn cadence(&self, category: RiskCategory) -> &ScreeningCadence {
        match category {
            RiskCategory::Low => &self.low,
            RiskCategory::Moderate => &self.moderate,
            RiskCategory::High => &self.high,
            RiskCategory::VeryHigh => &self.very_high,
        }
    }
}

/// Weights for the triage urgency signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyWeights {
    /// Score at which urgency reaches 1 with no biopsy history
    pub full_urgency_score: f64,
    pub biopsy_weight: f64,
    pub biopsy_cap: u32,
}

/// The complete, read-only scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub version: u32,
    pub age_bands: Vec<AgeBand>,
    pub multipliers: FactorMultipliers,
    /// Scale of the saturating map from raw risk to score
    pub saturation_scale: f64,
    pub thresholds: CategoryThresholds,
    pub percentile_curve: Vec<CurvePoint>,
    pub screening: ScreeningTable,
    pub urgency: UrgencyWeights,
}

fn ensure(condition: bool, table: &'static str, reason: impl Into<String>) -> Result<(), ConfigurationError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigurationError::Invalid {
            table,
            reason: reason.into(),
        })
    }
}

fn ensure_multiplier(table: &'static str, value: f64) -> Result<(), ConfigurationError> {
    ensure(
        value.is_finite() && value >= 1.0,
        table,
        format!("multiplier must be finite and >= 1, got {value}"),
    )
}

impl Calibration {
    /// The compiled-in tables, built once per process.
    pub fn standard() -> &'static Calibration {
        STANDARD.get_or_init(Self::standard_tables)
    }

    fn standard_tables() -> Self {
        let band = |min_age, baseline| AgeBand { min_age, baseline };
        let point = |score, percentile| CurvePoint { score, percentile };
        let cadence = |months, tightened_months| ScreeningCadence {
            months,
            tightened_months,
            tighten_from_age: 50.0,
        };

        Self {
            version: CALIBRATION_VERSION,
            age_bands: vec![
                band(18.0, 4.0),
                band(30.0, 6.0),
                band(40.0, 8.5),
                band(50.0, 11.0),
                band(60.0, 12.5),
                band(70.0, 13.0),
                band(80.0, 13.0),
                band(90.0, 13.0),
            ],
            multipliers: FactorMultipliers {
                family_history: 1.9,
                density: DensityMultipliers {
                    low: 1.0,
                    medium: 1.3,
                    high: 1.8,
                    very_high: 2.3,
                },
                bmi_premenopausal: BmiCurve {
                    knee: 30.0,
                    slope_per_unit: 0.01,
                },
                bmi_postmenopausal: BmiCurve {
                    knee: 25.0,
                    slope_per_unit: 0.03,
                },
                hormone_use_postmenopausal: 1.4,
                biopsy_step: 0.25,
                biopsy_cap: 4,
                early_menarche_age: 12.0,
                early_menarche_step: 0.08,
                late_pregnancy_age: 30.0,
                late_pregnancy: 1.2,
                nulliparity: 1.3,
            },
            saturation_scale: 100.0,
            thresholds: CategoryThresholds {
                moderate: 15.0,
                high: 30.0,
                very_high: 50.0,
            },
            percentile_curve: vec![
                point(0.0, 0.0),
                point(5.0, 20.0),
                point(10.0, 45.0),
                point(15.0, 62.0),
                point(20.0, 74.0),
                point(30.0, 87.0),
                point(40.0, 94.0),
                point(50.0, 97.0),
                point(70.0, 99.3),
                point(100.0, 100.0),
            ],
            screening: ScreeningTable {
                low: cadence(36, 24),
                moderate: cadence(24, 18),
                high: cadence(12, 12),
                very_high: cadence(6, 6),
            },
            urgency: UrgencyWeights {
                full_urgency_score: 50.0,
                biopsy_weight: 0.1,
                biopsy_cap: 4,
            },
        }
    }

    /// Parse and validate tables from JSON.
    ///
    /// # Errors
    /// Returns `ConfigurationError::Malformed` for unparsable JSON and
    /// `ConfigurationError::Invalid` for tables that break an invariant.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigurationError> {
        let calibration: Calibration =
            serde_json::from_str(content).map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Load and validate tables from a JSON file.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if the file is missing, malformed or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let calibration = Self::from_json_str(&content)?;

        tracing::info!(
            "Loaded calibration from {:?} (age_bands={}, fingerprint={})",
            path,
            calibration.age_bands.len(),
            calibration.fingerprint()
        );
        Ok(calibration)
    }

    /// Pretty JSON form, as written by `calibration_tool --export`.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the tables to `path` as pretty JSON, replacing any existing file.
    ///
    /// # Errors
    /// Returns `OncobridgeError::Serialization` if encoding fails and
    /// `OncobridgeError::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        std::fs::write(path, json)?;
        tracing::info!("Saved calibration to {:?} (fingerprint={})", path, self.fingerprint());
        Ok(())
    }

    /// SHA-256 over the compact JSON encoding, hex encoded.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        // Struct fields serialize in declaration order, so the encoding is stable.
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Check every table invariant.
    ///
    /// # Errors
    /// Returns the first violated invariant as `ConfigurationError::Invalid`.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure(
            self.version == CALIBRATION_VERSION,
            "version",
            format!("unsupported version {}", self.version),
        )?;
        self.validate_age_bands()?;
        self.validate_multipliers()?;
        ensure(
            self.saturation_scale.is_finite() && self.saturation_scale > 0.0,
            "saturation_scale",
            "must be finite and positive",
        )?;
        self.validate_thresholds()?;
        self.validate_percentile_curve()?;
        self.validate_screening()?;

        let u = &self.urgency;
        ensure(
            u.full_urgency_score.is_finite() && u.full_urgency_score > 0.0,
            "urgency",
            "full_urgency_score must be finite and positive",
        )?;
        ensure(
            u.biopsy_weight.is_finite() && u.biopsy_weight >= 0.0,
            "urgency",
            "biopsy_weight must be finite and non-negative",
        )
    }

    fn validate_age_bands(&self) -> Result<(), ConfigurationError> {
        let bands = &self.age_bands;
        let first = bands
            .first()
            .ok_or_else(|| ConfigurationError::Invalid {
                table: "age_bands",
                reason: "at least one band is required".into(),
            })?;
        ensure(
            first.min_age <= AGE_RANGE.0,
            "age_bands",
            format!("first band must start at or below {}", AGE_RANGE.0),
        )?;

        for band in bands {
            ensure(
                band.min_age.is_finite() && band.min_age <= AGE_RANGE.1,
                "age_bands",
                format!("band start {} outside supported ages", band.min_age),
            )?;
            ensure(
                band.baseline.is_finite() && band.baseline > 0.0 && band.baseline <= 100.0,
                "age_bands",
                format!("baseline {} must be in (0, 100]", band.baseline),
            )?;
        }

        for pair in bands.windows(2) {
            ensure(
                pair[1].min_age > pair[0].min_age,
                "age_bands",
                "band starts must be strictly increasing",
            )?;
            ensure(
                pair[1].baseline >= pair[0].baseline,
                "age_bands",
                "baselines must be non-decreasing with age",
            )?;
        }
        Ok(())
    }

    fn validate_multipliers(&self) -> Result<(), ConfigurationError> {
        let m = &self.multipliers;
        ensure_multiplier("multipliers.family_history", m.family_history)?;
        ensure_multiplier(
            "multipliers.hormone_use_postmenopausal",
            m.hormone_use_postmenopausal,
        )?;
        ensure_multiplier("multipliers.late_pregnancy", m.late_pregnancy)?;
        ensure_multiplier("multipliers.nulliparity", m.nulliparity)?;

        let d = &m.density;
        ensure_multiplier("multipliers.density", d.low)?;
        ensure(
            d.low < d.medium && d.medium < d.high && d.high < d.very_high && d.very_high.is_finite(),
            "multipliers.density",
            "must strictly increase from low to very_high",
        )?;

        for (table, curve) in [
            ("multipliers.bmi_premenopausal", &m.bmi_premenopausal),
            ("multipliers.bmi_postmenopausal", &m.bmi_postmenopausal),
        ] {
            ensure(
                (BMI_RANGE.0..=BMI_RANGE.1).contains(&curve.knee),
                table,
                format!("knee {} outside supported BMI range", curve.knee),
            )?;
            ensure(
                curve.slope_per_unit.is_finite() && curve.slope_per_unit >= 0.0,
                table,
                "slope must be finite and non-negative",
            )?;
        }

        for (table, step) in [
            ("multipliers.biopsy_step", m.biopsy_step),
            ("multipliers.early_menarche_step", m.early_menarche_step),
        ] {
            ensure(
                step.is_finite() && step >= 0.0,
                table,
                "step must be finite and non-negative",
            )?;
        }
        ensure(
            m.early_menarche_age.is_finite() && m.late_pregnancy_age.is_finite(),
            "multipliers",
            "age cut-offs must be finite",
        )
    }

    fn validate_thresholds(&self) -> Result<(), ConfigurationError> {
        let t = &self.thresholds;
        ensure(
            0.0 < t.moderate && t.moderate < t.high && t.high < t.very_high && t.very_high < 100.0,
            "thresholds",
            "must satisfy 0 < moderate < high < very_high < 100",
        )
    }

    fn validate_percentile_curve(&self) -> Result<(), ConfigurationError> {
        let curve = &self.percentile_curve;
        ensure(curve.len() >= 2, "percentile_curve", "at least two points are required")?;

        let anchored = matches!(
            (curve.first(), curve.last()),
            (Some(first), Some(last))
                if first.score == 0.0 && first.percentile == 0.0
                    && last.score == 100.0 && last.percentile == 100.0
        );
        ensure(
            anchored,
            "percentile_curve",
            "must start at (0, 0) and end at (100, 100)",
        )?;

        for pair in curve.windows(2) {
            ensure(
                pair[1].score > pair[0].score,
                "percentile_curve",
                "scores must be strictly increasing",
            )?;
            ensure(
                pair[1].percentile >= pair[0].percentile,
                "percentile_curve",
                "percentiles must be non-decreasing",
            )?;
        }
        Ok(())
    }

    fn validate_screening(&self) -> Result<(), ConfigurationError> {
        let mut previous: Option<u32> = None;
        for category in RiskCategory::ALL {
            let cadence = self.screening.cadence(category);
            ensure(
                cadence.months > 0 && cadence.tightened_months > 0,
                "screening",
                format!("{category} interval must be positive"),
            )?;
            ensure(
                cadence.tightened_months <= cadence.months,
                "screening",
                format!("{category} tightened interval must not exceed the standard one"),
            )?;
            ensure(
                cadence.tighten_from_age.is_finite(),
                "screening",
                format!("{category} tighten_from_age must be finite"),
            )?;
            if let Some(prev) = previous {
                ensure(
                    cadence.months <= prev,
                    "screening",
                    format!("{category} interval must not exceed that of a lower category"),
                )?;
            }
            previous = Some(cadence.months);
        }
        Ok(())
    }

    /// Age-only baseline incidence, in percentage points.
    #[must_use]
    pub fn baseline_for(&self, age: f64) -> f64 {
        self.age_bands
            .iter()
            .rev()
            .find(|band| band.min_age <= age)
            .or_else(|| self.age_bands.first())
            .map_or(0.0, |band| band.baseline)
    }

    /// Saturating map from raw risk (percentage points) to a bounded score.
    #[must_use]
    pub fn saturate(&self, raw: f64) -> f64 {
        let score = 100.0 * (1.0 - (-raw.max(0.0) / self.saturation_scale).exp());
        score.clamp(0.0, 100.0)
    }

    /// Percentile rank of a score by linear interpolation on the reference curve.
    #[must_use]
    pub fn percentile_for(&self, score: f64) -> f64 {
        let score = score.clamp(0.0, 100.0);
        for pair in self.percentile_curve.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if score <= hi.score {
                if score <= lo.score {
                    return lo.percentile;
                }
                let t = (score - lo.score) / (hi.score - lo.score);
                return (lo.percentile + (hi.percentile - lo.percentile) * t).clamp(0.0, 100.0);
            }
        }
        self.percentile_curve.last().map_or(100.0, |p| p.percentile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_are_valid() {
        Calibration::standard().validate().expect("Standard tables must validate");
    }

    #[test]
    fn test_category_thresholds_at_boundaries() {
        let t = &Calibration::standard().thresholds;
        assert_eq!(t.categorize(0.0), RiskCategory::Low);
        assert_eq!(t.categorize(14.999), RiskCategory::Low);
        assert_eq!(t.categorize(15.0), RiskCategory::Moderate);
        assert_eq!(t.categorize(29.999), RiskCategory::Moderate);
        assert_eq!(t.categorize(30.0), RiskCategory::High);
        assert_eq!(t.categorize(49.999), RiskCategory::High);
        assert_eq!(t.categorize(50.0), RiskCategory::VeryHigh);
        assert_eq!(t.categorize(100.0), RiskCategory::VeryHigh);
    }

    #[test]
    fn test_baseline_is_non_decreasing() {
        let cal = Calibration::standard();
        let mut previous = 0.0;
        let mut age = 18.0;
        while age <= 100.0 {
            let baseline = cal.baseline_for(age);
            assert!(baseline >= previous, "baseline dropped at age {age}");
            previous = baseline;
            age += 0.5;
        }
        assert_eq!(cal.baseline_for(29.9), 4.0);
        assert_eq!(cal.baseline_for(30.0), 6.0);
    }

    #[test]
    fn test_percentile_curve_is_monotone() {
        let cal = Calibration::standard();
        assert_eq!(cal.percentile_for(0.0), 0.0);
        assert_eq!(cal.percentile_for(100.0), 100.0);
        assert!((cal.percentile_for(12.5) - 53.5).abs() < 1e-9);

        let mut previous = cal.percentile_for(0.0);
        for step in 1..=10_000 {
            let score = f64::from(step) / 100.0;
            let pct = cal.percentile_for(score);
            assert!(pct >= previous - 1e-9, "percentile dropped at score {score}");
            assert!((0.0..=100.0).contains(&pct));
            previous = pct;
        }
    }

    #[test]
    fn test_saturation_is_bounded() {
        let cal = Calibration::standard();
        assert_eq!(cal.saturate(0.0), 0.0);
        assert!(cal.saturate(1e6) <= 100.0);
        assert!(cal.saturate(20.0) < 20.0);
        assert!(cal.saturate(20.0) > cal.saturate(19.0));
    }

    #[test]
    fn test_screening_cadence() {
        let s = &Calibration::standard().screening;
        assert_eq!(s.cadence(RiskCategory::VeryHigh).months_for_age(30.0), 6);
        assert_eq!(s.cadence(RiskCategory::High).months_for_age(65.0), 12);
        assert_eq!(s.cadence(RiskCategory::Moderate).months_for_age(49.0), 24);
        assert_eq!(s.cadence(RiskCategory::Moderate).months_for_age(50.0), 18);
        assert_eq!(s.cadence(RiskCategory::Low).months_for_age(35.0), 36);
        assert_eq!(s.cadence(RiskCategory::Low).months_for_age(55.0), 24);
    }

    #[test]
    fn test_json_round_trip_preserves_fingerprint() {
        let cal = Calibration::standard();
        let json = cal.to_json_pretty().expect("Should serialize");
        let parsed = Calibration::from_json_str(&json).expect("Should parse");
        assert_eq!(&parsed, cal);
        assert_eq!(parsed.fingerprint(), cal.fingerprint());
        assert_eq!(cal.fingerprint().len(), 64);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Calibration::from_json_str("{\"version\": 1").expect_err("Should fail");
        assert!(matches!(err, ConfigurationError::Malformed(_)));
    }

    #[test]
    fn test_invalid_tables_rejected() {
        let mut decreasing = Calibration::standard().clone();
        decreasing.age_bands[3].baseline = 1.0;
        assert!(matches!(
            decreasing.validate(),
            Err(ConfigurationError::Invalid { table: "age_bands", .. })
        ));

        let mut flat_density = Calibration::standard().clone();
        flat_density.multipliers.density.high = flat_density.multipliers.density.medium;
        assert!(flat_density.validate().is_err());

        let mut protective = Calibration::standard().clone();
        protective.multipliers.family_history = 0.8;
        assert!(protective.validate().is_err());

        let mut overlapping = Calibration::standard().clone();
        overlapping.thresholds.high = overlapping.thresholds.moderate;
        assert!(matches!(
            overlapping.validate(),
            Err(ConfigurationError::Invalid { table: "thresholds", .. })
        ));

        let mut unanchored = Calibration::standard().clone();
        unanchored.percentile_curve.pop();
        assert!(unanchored.validate().is_err());

        let mut lax = Calibration::standard().clone();
        lax.screening.very_high.months = 48;
        assert!(lax.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let err = Calibration::load(&dir.path().join("missing.json")).expect_err("Should fail");
        assert!(matches!(err, ConfigurationError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("calibration.json");
        let mut custom = Calibration::standard().clone();
        custom.multipliers.family_history = 2.1;
        std::fs::write(&path, custom.to_json_pretty().expect("Should serialize"))
            .expect("Should write");

        let loaded = Calibration::load(&path).expect("Should load");
        assert_eq!(loaded.multipliers.family_history, 2.1);
        assert_ne!(loaded.fingerprint(), Calibration::standard().fingerprint());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("exported.json");
        Calibration::standard().save(&path).expect("Should save");

        let loaded = Calibration::load(&path).expect("Should load");
        assert_eq!(loaded.fingerprint(), Calibration::standard().fingerprint());
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("absent").join("exported.json");
        let err = Calibration::standard().save(&path).expect_err("Should fail");
        assert!(matches!(err, crate::OncobridgeError::Io(_)));
    }
}
