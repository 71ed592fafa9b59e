//! Listing extraction from fetched HTML.
//!
//! ### TV listings
//! - `links`: the station index, one `Channel` per `#stations-index > a`.
//! - `listing`: one day of a channel, `ul.stationItems > li` items turned
//!   into `ScheduleEntry` rows (ads and untimed items dropped).
//!
//! ### Bus timetables
//! - `table`: every `<table>` of the page as a cell grid, read by fixed
//!   table/column offsets into `StopMeta` and `TimetableEntry` rows.
//!
//! ### Output Normalization
//! - `normalize`: episode bracket rewriting, time padding, Polish dates.

pub mod links;
pub mod listing;
pub mod normalize;
pub mod table;

pub use links::extract_channels;
pub use listing::{Listing, extract_listing};
pub use normalize::{day_header, format_date_pl, format_entry, normalize_title, pad_time};
pub use table::{Table, extract_meta, extract_timetable, parse_tables};

use scraper::ElementRef;

/// Collapse runs of whitespace to single spaces and trim.
pub(crate) fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All text under an element, whitespace-collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_ws(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_collapse_ws() {
        assert_eq!(collapse_ws("  Fakty \n\t wieczorne  "), "Fakty wieczorne");
        assert_eq!(collapse_ws("   "), "");
    }

    #[test]
    fn test_element_text_joins_inline_children() {
        let html = Html::parse_fragment("<p>Fa<b>kty</b>\n  <i>TVN</i></p>");
        let selector = Selector::parse("p").unwrap();
        let p = html.select(&selector).next().unwrap();
        assert_eq!(element_text(p), "Fakty TVN");
    }
}
