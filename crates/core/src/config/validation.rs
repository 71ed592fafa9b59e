//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `tv_base_url` or `bus_base_url` is not an absolute http(s) URL
    /// - `stations_path` does not start with `/`
    /// - `out_dir` is empty
    /// - a `bus_routes` entry has no stop or no lines
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        validate_http_url("tv_base_url", &self.tv_base_url)?;
        validate_http_url("bus_base_url", &self.bus_base_url)?;

        if !self.stations_path.starts_with('/') {
            return Err(ConfigError::Invalid { field: "stations_path".into(), reason: "must start with '/'".into() });
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "out_dir".into(), reason: "must not be empty".into() });
        }

        for route in &self.bus_routes {
            if route.stop.trim().is_empty() {
                return Err(ConfigError::Invalid { field: "bus_routes".into(), reason: "stop must not be empty".into() });
            }
            if route.lines.is_empty() {
                return Err(ConfigError::Invalid {
                    field: "bus_routes".into(),
                    reason: format!("no lines for stop {}", route.stop),
                });
            }
        }

        if self.smtp_pass.is_some() && self.smtp_user.is_empty() {
            tracing::warn!("smtp_pass is set but smtp_user is empty; the email report will fail to authenticate");
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::Invalid { field: field.into(), reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid { field: field.into(), reason: format!("unsupported scheme: {scheme}") }),
    }
}
