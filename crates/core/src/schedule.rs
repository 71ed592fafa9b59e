//! TV schedule data model.
//!
//! Everything here is built once per run by the scrape pipeline, rendered,
//! and dropped. Nothing is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A TV station's listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Display name, also used for the report file name.
    pub name: String,
    /// Site-relative path of the listing page (e.g. `/program-tv/stacje/TVP-1`).
    pub url: String,
}

impl Channel {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// One programme on a channel's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Start time, zero-padded to `HH:MM`. Never empty.
    pub time: String,
    /// Genre as shown by the site; empty when absent.
    pub category: String,
    /// Title with episode brackets already rewritten.
    pub title: String,
}

/// All entries for one calendar day, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock {
    pub date: NaiveDate,
    /// Localized header line, e.g. `Dzisiaj, czwartek, 11 kwietnia 2024`.
    pub label: String,
    pub entries: Vec<ScheduleEntry>,
}

/// Per-channel diagnostic record, collected for the email report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    pub name: String,
    pub url: String,
    /// Days attempted, including one that failed.
    pub days: usize,
    /// Entry lines produced across all days.
    pub lines: usize,
    /// Raw item count (ads and headers included) of the last fetched day.
    pub listing_len: usize,
    /// Last dated URL attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dated_url: Option<String>,
    /// Why the channel stopped early, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl RunInfo {
    pub fn new(channel: &Channel) -> Self {
        Self { name: channel.name.clone(), url: channel.url.clone(), ..Default::default() }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }
}

/// Outcome of scraping one channel.
///
/// Always carries whatever day blocks were gathered; `info.aborted` tells
/// whether the report is complete.
#[derive(Debug, Clone)]
pub struct ChannelReport {
    pub channel: Channel,
    pub days: Vec<DayBlock>,
    pub info: RunInfo,
}

impl ChannelReport {
    pub fn is_complete(&self) -> bool {
        !self.info.is_aborted()
    }
}

/// Run-wide counters, reported at the end of the email body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Channels processed.
    pub counter: usize,
    /// Channels that stopped early.
    pub aborted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl RunStats {
    pub fn record(&mut self, info: &RunInfo) {
        self.counter += 1;
        if info.is_aborted() {
            self.aborted += 1;
        }
    }
}
