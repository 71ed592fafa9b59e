//! Run dispatch for both tools.
//!
//! Everything is sequential: one page in flight at a time, channels and
//! lines in order.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use rozklad_client::render::file_name;
use rozklad_client::{
    BusQuery, PageSource, ReportWriter, RunContext, list_channels, render_channel, render_index, render_timetable,
    scrape_channel, scrape_timetable,
};
use rozklad_core::{AppConfig, BusRoute, Error, RunInfo, RunStats, StopRef};

use crate::args::Mode;

const INDEX_NAME: &str = "index";

/// What a TV run produced, for the email stage.
#[derive(Debug, Clone, Default)]
pub struct TvRun {
    pub infos: Vec<RunInfo>,
    pub stats: RunStats,
    pub written: Vec<PathBuf>,
}

/// Scrape, render and write the selected channels.
///
/// # Errors
///
/// Fails when the station index cannot be fetched or a report cannot be
/// written. A single channel failing part-way is recorded in its
/// `RunInfo` and does not stop the run. A channel whose report file name
/// is already taken is skipped with a warning.
pub async fn run_tv(
    source: &dyn PageSource, config: &AppConfig, mode: &Mode, days_ahead: u32, today: NaiveDate,
) -> Result<TvRun, Error> {
    let writer = ReportWriter::new(&config.out_dir)?;
    let ctx = RunContext::new(config, days_ahead, today);

    let channels = match mode {
        Mode::All => list_channels(source, &config.tv_base_url, &config.stations_path).await?,
        Mode::Single(channel) => vec![channel.clone()],
    };

    let mut run = TvRun { stats: RunStats { date: Some(today), ..Default::default() }, ..Default::default() };
    let mut index = Vec::with_capacity(channels.len());
    let mut files = HashSet::new();

    for channel in &channels {
        let file = file_name(&channel.name);
        if !files.insert(file.clone()) {
            tracing::warn!(name = %channel.name, url = %channel.url, "skipping channel, {} already written", file);
            continue;
        }

        let report = scrape_channel(source, &ctx, channel).await;
        run.stats.record(&report.info);

        let html = render_channel(&channel.name, &report.days);
        run.written.push(writer.write(&channel.name, &html)?);
        index.push((channel.name.clone(), file));

        tracing::info!(
            name = %channel.name,
            days = report.info.days,
            lines = report.info.lines,
            complete = report.is_complete(),
            "channel done"
        );
        run.infos.push(report.info);
    }

    if matches!(mode, Mode::All) {
        run.written.push(writer.write(INDEX_NAME, &render_index(&index))?);
    }

    tracing::info!(counter = run.stats.counter, aborted = run.stats.aborted, "run finished");
    Ok(run)
}

/// Scrape one stop for each line and write a report per line.
///
/// # Errors
///
/// The first fetch, layout or write failure ends the run.
pub async fn run_bus(
    source: &dyn PageSource, config: &AppConfig, stop: &StopRef, lines: &[String],
) -> Result<Vec<PathBuf>, Error> {
    let writer = ReportWriter::new(&config.out_dir)?;
    let mut written = Vec::with_capacity(lines.len());

    for line in lines {
        let query = BusQuery::new(config, stop.clone(), line.as_str());
        let timetable = scrape_timetable(source, &query).await?;
        let html = render_timetable(&timetable.meta, &timetable.entries);
        written.push(writer.write(&query.display_name(), &html)?);
    }

    Ok(written)
}

/// Run every route in order, one report per stop and line.
///
/// # Errors
///
/// The first failing route ends the run.
pub async fn run_routes(source: &dyn PageSource, config: &AppConfig, routes: &[BusRoute]) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::new();
    for route in routes {
        let stop = route.stop_ref();
        tracing::debug!(code = %stop.code, display = %stop.display, lines = ?route.lines, "route");
        written.extend(run_bus(source, config, &stop, &route.lines).await?);
    }
    Ok(written)
}
