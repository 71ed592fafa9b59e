//! TV listings pipeline.

use chrono::NaiveDate;
use rozklad_core::{Channel, ChannelReport, DayBlock, Error, RunInfo};

use super::RunContext;
use crate::extract::{day_header, extract_channels, extract_listing};
use crate::fetch::{PageSource, canonicalize, dated_url};

/// Enumerate channels from the station index page.
///
/// # Errors
///
/// Fails when the index cannot be fetched; the caller treats that as fatal.
pub async fn list_channels(source: &dyn PageSource, base_url: &str, stations_path: &str) -> Result<Vec<Channel>, Error> {
    let url = canonicalize(&format!("{base_url}{stations_path}"))?;
    tracing::debug!("station index {}", url);

    let html = source.get_html(&url).await?;
    let channels = extract_channels(&html);

    if channels.is_empty() {
        tracing::warn!("no channels found on {}", url);
    } else {
        tracing::debug!("found {} channels", channels.len());
    }

    Ok(channels)
}

/// Fetch and extract every requested day of one channel.
///
/// Never fails: the first fetch or parse error stops the channel and is
/// recorded in `info.aborted`, keeping the days gathered before it.
pub async fn scrape_channel(source: &dyn PageSource, ctx: &RunContext, channel: &Channel) -> ChannelReport {
    tracing::debug!(name = %channel.name, url = %channel.url, "scraping channel");

    let mut info = RunInfo::new(channel);
    let mut days = Vec::new();

    for date in ctx.dates() {
        info.days += 1;
        match scrape_day(source, ctx, channel, date, &mut info).await {
            Ok(block) => days.push(block),
            Err(e) => {
                tracing::warn!(name = %channel.name, day = %date, "channel aborted: {}", e);
                info.aborted = Some(e.to_string());
                break;
            }
        }
    }

    ChannelReport { channel: channel.clone(), days, info }
}

async fn scrape_day(
    source: &dyn PageSource, ctx: &RunContext, channel: &Channel, date: NaiveDate, info: &mut RunInfo,
) -> Result<DayBlock, Error> {
    let url = dated_url(&ctx.base_url, &channel.url, date)?;
    tracing::debug!("dated_url {}", url);
    info.dated_url = Some(url.to_string());

    let html = source.get_html(&url).await?;
    let listing = extract_listing(&html);
    tracing::debug!("listing len {}", listing.raw_len);

    info.listing_len = listing.raw_len;
    info.lines += listing.entries.len();

    Ok(DayBlock { date, label: day_header(date, ctx.today), entries: listing.entries })
}
