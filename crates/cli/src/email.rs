//! End-of-run report email.
//!
//! The body is the JSON of every channel's `RunInfo` followed by the run
//! stats, wrapped in `<pre>` and sent as HTML over STARTTLS SMTP.

use chrono::NaiveDate;
use html_escape::encode_text;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use rozklad_core::{AppConfig, ConfigError, RunInfo, RunStats};

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Subject line, `{YYYY-MM-DD} report`.
pub fn subject(date: NaiveDate) -> String {
    format!("{date} report")
}

/// HTML body: each record pretty-printed, then the stats.
pub fn compose_body(infos: &[RunInfo], stats: &RunStats) -> Result<String, EmailError> {
    let mut text = String::new();
    for info in infos {
        text.push_str(&serde_json::to_string_pretty(info)?);
        text.push('\n');
    }
    text.push_str(&serde_json::to_string_pretty(stats)?);
    Ok(format!("<pre>\n{}\n</pre>", encode_text(&text)))
}

/// Build the report message from the configured sender to the admin.
pub fn compose(config: &AppConfig, date: NaiveDate, html: String) -> Result<Message, EmailError> {
    let from: Mailbox = config.smtp_user.parse()?;
    let to: Mailbox = config.admin_email.parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(subject(date))
        .header(ContentType::TEXT_HTML)
        .body(html)?)
}

/// Authenticated SMTP relay for the report.
pub struct Mailer {
    transport: SmtpTransport,
}

impl Mailer {
    /// # Errors
    ///
    /// Fails without a password or when the relay host is unusable.
    pub fn new(config: &AppConfig) -> Result<Self, EmailError> {
        let pass = config.require_smtp_pass()?;
        let credentials = Credentials::new(config.smtp_user.clone(), pass.to_string());

        let transport = SmtpTransport::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(config.timeout()))
            .build();

        Ok(Self { transport })
    }

    /// Blocking send.
    pub fn send(&self, message: &Message) -> Result<(), EmailError> {
        self.transport.send(message)?;
        Ok(())
    }
}
