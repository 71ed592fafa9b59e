//! Command-line arguments of both tools.
//!
//! Flags override the loaded `AppConfig`; validation runs before any
//! network activity.

use std::path::PathBuf;

use clap::Parser;
use rozklad_core::{AppConfig, BusRoute, Channel};

/// Argument validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("either all or channel: --all and --channel-name are mutually exclusive")]
    BothModes,

    #[error("either all or channel: pass --all or --channel-name")]
    NoMode,

    #[error("--channel-name requires --channel-url")]
    MissingChannelUrl,

    #[error("smtp pass required: --email needs --smtp-pass or ROZKLAD_SMTP_PASS")]
    MissingSmtpPass,

    #[error("stop {0} given without any IDLinii")]
    MissingLines(String),

    #[error("no stop given and no bus_routes configured")]
    NoRoutes,
}

/// Which channels a TV run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Every channel on the station index, plus an index page.
    All,
    Single(Channel),
}

/// Polish TV station listings scraper.
#[derive(Debug, Clone, Parser)]
#[command(name = "program-tv", version, about)]
pub struct TvArgs {
    /// Parse all channels
    #[arg(short = 'a', long)]
    pub all: bool,

    #[arg(short = 'c', long)]
    pub channel_name: Option<String>,

    /// Listing path of the channel, e.g. /program-tv/stacje/TVP-1
    #[arg(short = 'C', long)]
    pub channel_url: Option<String>,

    /// How many days ahead to parse
    #[arg(short = 'd', long, default_value_t = 3)]
    pub days_ahead: u32,

    /// Print debug info as you go
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Send report email
    #[arg(short = 'e', long)]
    pub email: bool,

    #[arg(short = 'A', long)]
    pub admin_email: Option<String>,

    #[arg(long)]
    pub smtp_port: Option<u16>,

    #[arg(long)]
    pub smtp_host: Option<String>,

    #[arg(long)]
    pub smtp_user: Option<String>,

    #[arg(long)]
    pub smtp_pass: Option<String>,

    /// Directory for the HTML reports
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,
}

impl TvArgs {
    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(email) = &self.admin_email {
            config.admin_email = email.clone();
        }
        if let Some(port) = self.smtp_port {
            config.smtp_port = port;
        }
        if let Some(host) = &self.smtp_host {
            config.smtp_host = host.clone();
        }
        if let Some(user) = &self.smtp_user {
            config.smtp_user = user.clone();
        }
        if let Some(pass) = &self.smtp_pass {
            config.smtp_pass = Some(pass.clone());
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = dir.clone();
        }
    }

    /// Check flag combinations and pick the run mode.
    pub fn validate(&self, config: &AppConfig) -> Result<Mode, ArgsError> {
        let mode = match (self.all, &self.channel_name) {
            (true, Some(_)) => return Err(ArgsError::BothModes),
            (false, None) => return Err(ArgsError::NoMode),
            (true, None) => Mode::All,
            (false, Some(name)) => {
                let url = self.channel_url.as_ref().ok_or(ArgsError::MissingChannelUrl)?;
                Mode::Single(Channel::new(name.clone(), url.clone()))
            }
        };

        if self.email && config.require_smtp_pass().is_err() {
            return Err(ArgsError::MissingSmtpPass);
        }

        Ok(mode)
    }
}

/// Bus timetable pages from the timetable CMS.
///
/// Without a stop, every route in the `bus_routes` config is reported.
#[derive(Debug, Clone, Parser)]
#[command(name = "rozklad-bus", version, about)]
pub struct BusArgs {
    /// Stop code (e.g. 331-02) or a known stop name (e.g. CHOPINA_CENTRUM)
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Line numbers, one report each
    #[arg(value_name = "IDLinii")]
    pub lines: Vec<String>,

    #[arg(long = "IDKlienta", value_name = "IDKlienta")]
    pub client_id: Option<String>,

    #[arg(long)]
    pub cmd: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for the HTML reports
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Print debug info as you go
    #[arg(short = 'D', long)]
    pub debug: bool,
}

impl BusArgs {
    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(id) = &self.client_id {
            config.bus_client_id = id.clone();
        }
        if let Some(cmd) = &self.cmd {
            config.bus_cmd = cmd.clone();
        }
        if let Some(url) = &self.base_url {
            config.bus_base_url = url.clone();
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = dir.clone();
        }
    }

    /// The routes to report: the stop and lines given, or the configured list.
    pub fn routes(&self, config: &AppConfig) -> Result<Vec<BusRoute>, ArgsError> {
        match &self.id {
            Some(id) if self.lines.is_empty() => Err(ArgsError::MissingLines(id.clone())),
            Some(id) => Ok(vec![BusRoute { stop: id.clone(), lines: self.lines.clone() }]),
            None if config.bus_routes.is_empty() => Err(ArgsError::NoRoutes),
            None => Ok(config.bus_routes.clone()),
        }
    }
}
