//! Service configuration from environment variables.
//!
//! Unset variables fall back to defaults. Values that are set but unusable are
//! rejected, except log settings, which fall back like the sanitizer cap does.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::ConfigurationError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_LOG_FILE: &str = "oncobridge.log";

/// Where formatted log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Stdout,
    File,
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Path prefix for API routes, `/api` by default. Empty mounts at the root.
    pub api_prefix: String,
    /// Calibration file replacing the compiled-in tables
    pub calibration_path: Option<PathBuf>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigurationError::Setting` for an unparsable bind address or
    /// a malformed prefix.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("ONCOBRIDGE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigurationError::Setting {
                name: "ONCOBRIDGE_BIND_ADDR",
                reason: format!("{bind_raw:?}: {e}"),
            })?;

        let api_prefix = normalize_prefix(
            &lookup("ONCOBRIDGE_API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        )?;

        let calibration_path = lookup("ONCOBRIDGE_CALIBRATION_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let log_mode = match lookup("ONCOBRIDGE_LOG_MODE").as_deref().map(str::trim) {
            Some("file") => LogMode::File,
            _ => LogMode::Stdout,
        };

        let log_file = lookup("ONCOBRIDGE_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        Ok(Self {
            bind_addr,
            api_prefix,
            calibration_path,
            log_mode,
            log_file,
        })
    }
}

/// Strip surrounding whitespace and trailing slashes and require a leading one.
/// `/` and the empty string both mean "no prefix".
fn normalize_prefix(raw: &str) -> Result<String, ConfigurationError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') || trimmed.contains(char::is_whitespace) {
        return Err(ConfigurationError::Setting {
            name: "ONCOBRIDGE_API_PREFIX",
            reason: format!("{raw:?} must start with '/' and contain no spaces"),
        });
    }
    Ok(trimmed.to_string())
}
