//! Bus timetable pipeline.

use rozklad_core::{AppConfig, Error, StopMeta, StopRef, TimetableEntry};
use url::Url;

use crate::extract::{extract_meta, extract_timetable, parse_tables};
use crate::fetch::{PageSource, bus_url};

/// One stop/line request against the timetable CMS.
#[derive(Debug, Clone)]
pub struct BusQuery {
    pub base_url: String,
    pub client_id: String,
    pub cmd: String,
    pub stop: StopRef,
    pub line: String,
}

impl BusQuery {
    pub fn new(config: &AppConfig, stop: StopRef, line: impl Into<String>) -> Self {
        Self {
            base_url: config.bus_base_url.clone(),
            client_id: config.bus_client_id.clone(),
            cmd: config.bus_cmd.clone(),
            stop,
            line: line.into(),
        }
    }

    pub fn url(&self) -> Result<Url, Error> {
        Ok(bus_url(&self.base_url, &self.stop.code, &self.line, &self.client_id, &self.cmd)?)
    }

    /// Report name, `{line}.{stop}`.
    pub fn display_name(&self) -> String {
        format!("{}.{}", self.line, self.stop.display)
    }
}

/// Everything read from one stop/line page.
#[derive(Debug, Clone)]
pub struct StopTimetable {
    pub meta: StopMeta,
    pub entries: Vec<TimetableEntry>,
}

/// Fetch and extract one stop/line timetable.
///
/// # Errors
///
/// Any fetch failure or malformed page is returned as is; the bus tool does
/// not continue past it.
pub async fn scrape_timetable(source: &dyn PageSource, query: &BusQuery) -> Result<StopTimetable, Error> {
    let url = query.url()?;
    tracing::debug!("timetable url {}", url);

    let html = source.get_html(&url).await?;
    let tables = parse_tables(&html);
    tracing::debug!("{} tables on page", tables.len());

    let meta = extract_meta(&tables)?;
    let entries = extract_timetable(&tables)?;

    tracing::debug!(
        stop = %meta.stop_name,
        destination = %meta.destination_stop,
        valid_since = %meta.valid_since,
        other_lines = ?meta.other_lines,
        "{} departures",
        entries.len()
    );

    Ok(StopTimetable { meta, entries })
}
