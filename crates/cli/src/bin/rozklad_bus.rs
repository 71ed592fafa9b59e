//! Bus timetable scraper entry point.
//!
//! Reports the stop and lines given on the command line, or every configured
//! route when no stop is given.

use anyhow::Result;
use clap::Parser;
use rozklad_cli::{BusArgs, logging, run_routes};
use rozklad_client::{FetchClient, FetchConfig};
use rozklad_core::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = BusArgs::parse();
    logging::init(args.debug);

    let mut config = AppConfig::load()?;
    args.apply(&mut config);
    config.validate()?;
    let routes = args.routes(&config)?;

    let client = FetchClient::new(FetchConfig::from(&config))?;
    let written = run_routes(&client, &config, &routes).await?;
    tracing::info!("{} timetables written", written.len());

    Ok(())
}
