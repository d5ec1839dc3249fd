//! Oncobridge: Breast cancer risk assessment service
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use oncobridge::adapters::sanitize::SanitizingMakeWriter;
use oncobridge::adapters::{CalibratedRiskEngine, SeriesRenderer};
use oncobridge::application::AssessmentService;
use oncobridge::config::{LogMode, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from_env()?;

    // Initialize logging. Every line goes through the PII sanitizer.
    let (writer, _guard) = match config.log_mode {
        LogMode::File => {
            if let Some(parent) = config.log_file.parent() {
                // Best-effort: the open below reports the real failure.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("opening log file {}", config.log_file.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stdout => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Oncobridge {}...", env!("CARGO_PKG_VERSION"));

    let engine = match &config.calibration_path {
        Some(path) => CalibratedRiskEngine::from_path(path)?,
        None => CalibratedRiskEngine::new(),
    };
    let renderer = SeriesRenderer::for_calibration(engine.calibration());
    let service = AssessmentService::new(Arc::new(engine), Arc::new(renderer));

    let app = oncobridge::http::router(service, &config.api_prefix);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(
        "Listening on http://{} (api prefix {:?})",
        config.bind_addr,
        config.api_prefix
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Oncobridge shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
