//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ROZKLAD_*)
//! 2. TOML config file (if ROZKLAD_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! Command-line flags are applied on top of the loaded value by the binaries.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::timetable::{BusRoute, KnownStop};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (ROZKLAD_*)
/// 2. TOML config file (if ROZKLAD_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Scheme and host of the TV listings site.
    #[serde(default = "default_tv_base_url")]
    pub tv_base_url: String,

    /// Path of the station index page on the TV listings site.
    #[serde(default = "default_stations_path")]
    pub stations_path: String,

    /// Timetable CMS endpoint.
    #[serde(default = "default_bus_base_url")]
    pub bus_base_url: String,

    /// `IDKlienta` query parameter sent to the timetable CMS.
    #[serde(default = "default_bus_client_id")]
    pub bus_client_id: String,

    /// `cmd` query parameter sent to the timetable CMS.
    #[serde(default = "default_bus_cmd")]
    pub bus_cmd: String,

    /// Stops and lines reported when `rozklad-bus` is run without a stop.
    #[serde(default = "default_bus_routes")]
    pub bus_routes: Vec<BusRoute>,

    /// Directory the HTML reports are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default = "default_smtp_user")]
    pub smtp_user: String,

    /// SMTP password. Required only when the email report is requested.
    ///
    /// Set via ROZKLAD_SMTP_PASS environment variable.
    #[serde(default)]
    pub smtp_pass: Option<String>,

    /// Recipient of the run report.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
}

fn default_user_agent() -> String {
    concat!("rozklad/", env!("CARGO_PKG_VERSION")).into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_tv_base_url() -> String {
    "https://www.teleman.pl".into()
}

fn default_stations_path() -> String {
    "/program-tv/stacje".into()
}

fn default_bus_base_url() -> String {
    "http://cms.mobiinfo.pl/m/r7xp.php".into()
}

fn default_bus_client_id() -> String {
    "KONIN_MZK_NOWY".into()
}

fn default_bus_cmd() -> String {
    "rozID".into()
}

fn default_bus_routes() -> Vec<BusRoute> {
    vec![
        BusRoute::new(KnownStop::ChopinaCentrum.name(), &["54", "55", "59"]),
        BusRoute::new(KnownStop::PaderewskiegoSzymanowskiegoPilsudskiego.name(), &["53"]),
    ]
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_smtp_host() -> String {
    "smtp.mailgun.org".into()
}

fn default_smtp_port() -> u16 {
    25
}

fn default_smtp_user() -> String {
    "postmaster@example.com".into()
}

fn default_admin_email() -> String {
    "admin@example.com".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            tv_base_url: default_tv_base_url(),
            stations_path: default_stations_path(),
            bus_base_url: default_bus_base_url(),
            bus_client_id: default_bus_client_id(),
            bus_cmd: default_bus_cmd(),
            bus_routes: default_bus_routes(),
            out_dir: default_out_dir(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_user: default_smtp_user(),
            smtp_pass: None,
            admin_email: default_admin_email(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `ROZKLAD_`
    /// 2. TOML file from `ROZKLAD_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ROZKLAD_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("ROZKLAD_").map(|key| key.as_str().to_lowercase().into()));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// SMTP password, required once the email stage is enabled.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no password is set or it is empty.
    pub fn require_smtp_pass(&self) -> Result<&str, ConfigError> {
        self.smtp_pass
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "smtp_pass".into(),
                hint: "pass --smtp-pass or set ROZKLAD_SMTP_PASS".into(),
            })
    }
}
