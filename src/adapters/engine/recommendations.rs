//! Rule set turning a category and profile flags into ordered directives.

use crate::domain::{BreastDensity, PatientProfile, RiskCategory};

/// BMI above which weight management is advised.
const OVERWEIGHT_BMI: f64 = 25.0;

/// Directives that every assessment in a category receives.
fn category_directives(category: RiskCategory, months: u32) -> [String; 2] {
    match category {
        RiskCategory::Low => [
            format!("Follow standard screening guidelines for your age (every {months} months)"),
            "Continue regular breast self-examinations".to_string(),
        ],
        RiskCategory::Moderate => [
            format!("Schedule screening mammography every {months} months"),
            "Review your risk factors at your next clinical breast exam".to_string(),
        ],
        RiskCategory::High => [
            format!("Schedule screening mammography every {months} months"),
            "Discuss risk-reducing options with your physician".to_string(),
        ],
        RiskCategory::VeryHigh => [
            format!("Arrange enhanced surveillance with screening every {months} months"),
            "Request a referral to a high-risk breast clinic".to_string(),
        ],
    }
}

/// Build the ordered recommendation list.
///
/// Category directives come first, followed by flag rules in fixed order.
pub(super) fn recommend(profile: &PatientProfile, category: RiskCategory, months: u32) -> Vec<String> {
    let mut out: Vec<String> = category_directives(category, months).into_iter().collect();

    if profile.family_history {
        out.push("Consider genetic counseling and BRCA1/BRCA2 testing".to_string());
    }
    if matches!(
        profile.breast_density,
        BreastDensity::High | BreastDensity::VeryHigh
    ) {
        out.push("Consider supplemental imaging (breast ultrasound or MRI)".to_string());
    }
    if profile.bmi > OVERWEIGHT_BMI {
        out.push("Maintain a healthy weight through diet and exercise".to_string());
    }
    if profile.hormone_use && profile.menopausal_status.is_postmenopausal() {
        out.push("Review hormone replacement therapy risks with your physician".to_string());
    }
    if profile.previous_biopsies > 0 {
        out.push("Share prior biopsy pathology reports with your screening provider".to_string());
    }

    out
}
