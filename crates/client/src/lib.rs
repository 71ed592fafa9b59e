//! Client code for rozklad.
//!
//! This crate provides the HTTP fetch pipeline, listing and timetable
//! extraction, text normalization and HTML report rendering shared by the
//! command-line tools.

pub mod extract;
pub mod fetch;
pub mod render;
pub mod scrape;

pub use extract::{Listing, Table, extract_channels, extract_listing, extract_meta, extract_timetable, parse_tables};

pub use fetch::{FetchClient, FetchConfig, FetchResponse, PageSource};

pub use render::{ReportWriter, render_channel, render_index, render_timetable};

pub use scrape::{BusQuery, RunContext, StopTimetable, list_channels, scrape_channel, scrape_timetable};
