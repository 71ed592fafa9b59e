//! One day of a channel's listing page.

use std::sync::LazyLock;

use rozklad_core::ScheduleEntry;
use scraper::{ElementRef, Html, Selector};

use super::element_text;
use super::normalize::{normalize_title, pad_time};

static ITEMS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul.stationItems > li").expect("invalid selector"));
static GENRE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.genre").expect("invalid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("invalid selector"));

/// Entries found on one listing page.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Every listing item on the page, ads and section headers included.
    pub raw_len: usize,
    /// Programmes in page order.
    pub entries: Vec<ScheduleEntry>,
}

/// Extract the programme rows of a channel's listing page.
///
/// Items with an `ad` class are dropped, as are items whose direct `<em>`
/// child (the start time) is missing or empty. Entries keep page order.
pub fn extract_listing(html: &str) -> Listing {
    let document = Html::parse_document(html);

    let mut listing = Listing::default();

    for item in document.select(&ITEMS) {
        listing.raw_len += 1;

        if item.value().classes().any(|c| c == "ad") {
            continue;
        }

        let time = direct_child(item, "em").map(element_text).unwrap_or_default();
        if time.is_empty() {
            continue;
        }

        let category = item.select(&GENRE).next().map(element_text).unwrap_or_default();

        let title = item
            .select(&LINK)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        listing
            .entries
            .push(ScheduleEntry { time: pad_time(&time), category, title: normalize_title(&title) });
    }

    listing
}

fn direct_child<'a>(element: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == name)
}
