//! Scrape pipelines: fetch, extract and normalize one channel or one stop.
//!
//! Both pipelines are sequential; every page is fetched and processed before
//! the next request is sent.

pub mod bus;
pub mod tv;

pub use bus::{BusQuery, StopTimetable, scrape_timetable};
pub use tv::{list_channels, scrape_channel};

use chrono::NaiveDate;
use rozklad_core::AppConfig;

/// Inputs of a TV run, passed explicitly through the pipeline.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Scheme and host of the listings site.
    pub base_url: String,
    /// Days to fetch after today; 0 fetches today only.
    pub days_ahead: u32,
    /// Date treated as today, for the `Dzisiaj` header and the first day.
    pub today: NaiveDate,
}

impl RunContext {
    pub fn new(config: &AppConfig, days_ahead: u32, today: NaiveDate) -> Self {
        Self { base_url: config.tv_base_url.clone(), days_ahead, today }
    }

    /// Dates covered by the run, today first.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..=self.days_ahead).filter_map(move |offset| self.today.checked_add_days(chrono::Days::new(offset.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_context_dates_inclusive() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let ctx = RunContext { base_url: "https://www.teleman.pl".into(), days_ahead: 3, today };
        let dates: Vec<String> = ctx.dates().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2024-12-30", "2024-12-31", "2025-01-01", "2025-01-02"]);
    }

    #[test]
    fn test_run_context_today_only() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 11).unwrap();
        let ctx = RunContext::new(&AppConfig::default(), 0, today);
        assert_eq!(ctx.base_url, "https://www.teleman.pl");
        assert_eq!(ctx.dates().collect::<Vec<_>>(), vec![today]);
    }
}
