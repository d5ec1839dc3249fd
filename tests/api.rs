//! End-to-end checks of the HTTP contract the website relies on.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use oncobridge::adapters::{CalibratedRiskEngine, SeriesRenderer};
use oncobridge::application::AssessmentService;
use oncobridge::http::dto::{AssessmentResponse, ErrorResponse};
use oncobridge::RiskCategory;

fn app_with_prefix(prefix: &str) -> Router {
    let service = AssessmentService::new(
        Arc::new(CalibratedRiskEngine::new()),
        Arc::new(SeriesRenderer::default()),
    );
    oncobridge::http::router(service, prefix)
}

fn app() -> Router {
    app_with_prefix("/api")
}

fn profile() -> Value {
    json!({
        "age": 45,
        "bmi": 24.5,
        "family_history": false,
        "breast_density": "medium",
        "menopausal_status": "premenopausal",
        "hormone_use": false,
        "previous_biopsies": 0,
        "first_menstruation_age": 13,
        "first_pregnancy_age": 28
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("Should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "healthy", "service": "breast_cancer_risk_assessment"})
    );
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["assess"], "/api/assess");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_presets() {
    let (status, body) = send(app(), get("/api/presets")).await;
    assert_eq!(status, StatusCode::OK);
    let presets = body["presets"].as_object().expect("presets object");
    for name in ["low_risk", "moderate_risk", "high_risk", "very_high_risk"] {
        assert!(presets.contains_key(name), "missing preset {name}");
    }
    assert_eq!(presets.len(), 4);
    assert_eq!(presets["high_risk"]["breast_density"], "high");
}

#[tokio::test]
async fn test_assess_returns_nested_metrics() {
    let (status, body) = send(app(), post_json("/api/assess", profile().to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let response: AssessmentResponse =
        serde_json::from_value(body.clone()).expect("Should decode assessment");
    assert_eq!(response.risk_category, RiskCategory::Low);
    assert_eq!(response.metrics.screening_frequency_months, 36);

    let score = body["risk_score"].as_f64().expect("risk_score");
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(body["risk_category"], "low");
    assert_eq!(body["patient_age"], 45.0);
    assert!(body["recommendations"].as_array().is_some_and(|r| !r.is_empty()));
    assert!(body["contributing_factors"]["age"].is_number());

    let metrics = &body["metrics"];
    assert!(metrics["percentile_rank"].is_number());
    assert_eq!(metrics["screening_frequency_months"], 36);
    assert!(metrics["urgency_score"].is_number());
}

#[tokio::test]
async fn test_presets_round_trip_through_assess() {
    let (_, body) = send(app(), get("/api/presets")).await;
    let preset = body["presets"]["very_high_risk"].to_string();
    let (status, body) = send(app(), post_json("/api/assess", preset)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_category"], "very_high");
    assert_eq!(body["metrics"]["screening_frequency_months"], 6);
}

#[tokio::test]
async fn test_score_at_threshold_is_published_in_upper_category() {
    let mut boundary = profile();
    boundary["age"] = json!(50);
    boundary["bmi"] = json!(43.6085);
    let (status, body) = send(app(), post_json("/api/assess", boundary.to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let response: AssessmentResponse =
        serde_json::from_value(body).expect("Should decode assessment");
    assert_eq!(response.risk_score, 15.0);
    assert_eq!(response.risk_category, RiskCategory::Moderate);
    assert_eq!(response.metrics.screening_frequency_months, 18);
}

#[tokio::test]
async fn test_invalid_age_is_bad_request() {
    let mut invalid = profile();
    invalid["age"] = json!(15);
    let (status, body) = send(app(), post_json("/api/assess", invalid.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_value(body).expect("Should decode error");
    assert!(error.error.contains("age"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, body) = send(app(), post_json("/api/assess", "{\"age\": ".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let mut incomplete = profile();
    incomplete.as_object_mut().unwrap().remove("bmi");
    let (status, body) = send(app(), post_json("/api/assess", incomplete.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("bmi")));
}

#[tokio::test]
async fn test_plot_kinds() {
    for kind in ["risk_score", "factors", "timeline"] {
        let uri = format!("/api/plot/{kind}");
        let (status, body) = send(app(), post_json(&uri, profile().to_string())).await;
        assert_eq!(status, StatusCode::OK, "plot {kind}");
        assert_eq!(body["kind"], kind);
    }
}

#[tokio::test]
async fn test_plot_invalid_profile_is_bad_request() {
    let mut invalid = profile();
    invalid["previous_biopsies"] = json!(11);
    let (status, _) = send(app(), post_json("/api/plot/factors", invalid.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_plot_kind_is_not_found() {
    let (status, body) = send(app(), post_json("/api/plot/histogram", profile().to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_root_prefix() {
    let (status, _) = send(app_with_prefix(""), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.expect("Should respond");
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.as_bytes()),
        Some(&b"*"[..])
    );
}
