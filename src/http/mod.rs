//! HTTP surface: axum routes over the assessment service.
//!
//! Handlers are thin. They decode the body, call the service and map the
//! outcome to the wire format in [`dto`].

pub mod dto;
mod error;

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use crate::application::AssessmentService;
use crate::domain::PatientProfile;
use crate::ports::{Chart, ChartKind, ChartRenderer, RiskModel};
use dto::{AssessmentResponse, HealthResponse, IndexResponse, PresetsResponse};

const SERVICE_NAME: &str = "breast_cancer_risk_assessment";

/// Build the application router.
///
/// API routes live under `prefix` (already normalized, see
/// [`crate::config::ServiceConfig`]); the index stays at `/`.
pub fn router<M, R>(service: AssessmentService<M, R>, prefix: &str) -> Router
where
    M: RiskModel + 'static,
    R: ChartRenderer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health))
        .route("/presets", get(presets::<M, R>))
        .route("/assess", post(assess::<M, R>))
        .route("/plot/:kind", post(plot::<M, R>));

    let index_prefix = prefix.to_string();
    let root = Router::new().route("/", get(move || index(index_prefix.clone())));

    // axum refuses to nest at the root path.
    let app = if prefix.is_empty() {
        root.merge(api)
    } else {
        root.nest(prefix, api)
    };

    app.with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn index(prefix: String) -> Json<IndexResponse> {
    let mut endpoints: BTreeMap<&'static str, String> = BTreeMap::new();
    endpoints.insert("health", format!("{prefix}/health"));
    endpoints.insert("presets", format!("{prefix}/presets"));
    endpoints.insert("assess", format!("{prefix}/assess"));
    endpoints.insert("plot_risk_score", format!("{prefix}/plot/risk_score"));
    endpoints.insert("plot_factors", format!("{prefix}/plot/factors"));
    endpoints.insert("plot_timeline", format!("{prefix}/plot/timeline"));

    Json(IndexResponse {
        message: "ONCOBRIDGE Breast Cancer Risk Assessment API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

async fn presets<M, R>(State(service): State<AssessmentService<M, R>>) -> Json<PresetsResponse>
where
    M: RiskModel + 'static,
    R: ChartRenderer + 'static,
{
    Json(PresetsResponse {
        presets: service.presets(),
    })
}

async fn assess<M, R>(
    State(service): State<AssessmentService<M, R>>,
    payload: Result<Json<PatientProfile>, JsonRejection>,
) -> Result<Json<AssessmentResponse>, ApiError>
where
    M: RiskModel + 'static,
    R: ChartRenderer + 'static,
{
    let Json(profile) = payload?;
    let result = service.assess(&profile)?;
    Ok(Json(result.into()))
}

async fn plot<M, R>(
    State(service): State<AssessmentService<M, R>>,
    Path(kind): Path<String>,
    payload: Result<Json<PatientProfile>, JsonRejection>,
) -> Result<Json<Chart>, ApiError>
where
    M: RiskModel + 'static,
    R: ChartRenderer + 'static,
{
    let kind = ChartKind::from_name(&kind)
        .ok_or_else(|| ApiError::not_found(format!("Unknown plot type: {kind}")))?;
    let Json(profile) = payload?;
    let chart = service.chart(kind, &profile)?;
    Ok(Json(chart))
}
