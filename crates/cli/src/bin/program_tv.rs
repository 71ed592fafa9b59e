//! TV listings scraper entry point.
//!
//! Writes one HTML report per channel (plus an index in `--all` mode) and
//! optionally emails the run summary.

use anyhow::Result;
use clap::Parser;
use rozklad_cli::{Mailer, TvArgs, email, logging, run_tv};
use rozklad_client::{FetchClient, FetchConfig};
use rozklad_core::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = TvArgs::parse();
    logging::init(args.debug);

    let mut config = AppConfig::load()?;
    args.apply(&mut config);
    config.validate()?;
    let mode = args.validate(&config)?;

    let today = chrono::Local::now().date_naive();
    let client = FetchClient::new(FetchConfig::from(&config))?;
    let run = run_tv(&client, &config, &mode, args.days_ahead, today).await?;

    if args.email {
        let body = email::compose_body(&run.infos, &run.stats)?;
        let message = email::compose(&config, today, body)?;
        let mailer = Mailer::new(&config)?;
        tokio::task::spawn_blocking(move || mailer.send(&message)).await??;
        tracing::info!("report sent to {}", config.admin_email);
    }

    Ok(())
}
