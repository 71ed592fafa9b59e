//! Channel harvesting from the station index page.

use rozklad_core::Channel;
use scraper::{Html, Selector};
use std::collections::HashSet;

use super::element_text;

/// Extract the channels listed on the station index.
///
/// Every `#stations-index > a` with an href and a non-empty label becomes a
/// `Channel`, in document order. Repeated hrefs are kept once.
pub fn extract_channels(html: &str) -> Vec<Channel> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("#stations-index > a").expect("invalid selector");

    let mut seen = HashSet::new();
    let mut channels = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) if !h.trim().is_empty() => h.trim().to_string(),
            _ => continue,
        };

        let name = element_text(element);
        if name.is_empty() {
            tracing::debug!("skipping unnamed station link {}", href);
            continue;
        }

        if !seen.insert(href.clone()) {
            continue;
        }

        channels.push(Channel { name, url: href });
    }

    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_channels_basic() {
        let html = r#"
            <html>
                <body>
                    <div id="stations-index">
                        <a href="/program-tv/stacje/TVP-1">TVP 1</a>
                        <a href="/program-tv/stacje/Polsat">Polsat</a>
                    </div>
                </body>
            </html>
        "#;

        let channels = extract_channels(html);

        assert_eq!(
            channels,
            vec![Channel::new("TVP 1", "/program-tv/stacje/TVP-1"), Channel::new("Polsat", "/program-tv/stacje/Polsat")]
        );
    }

    #[test]
    fn test_extract_channels_only_direct_children() {
        let html = r#"
            <div id="stations-index">
                <a href="/program-tv/stacje/TVN">TVN</a>
                <p><a href="/o-nas">O nas</a></p>
            </div>
            <a href="/program-tv/stacje/Outside">Outside</a>
        "#;

        let channels = extract_channels(html);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "TVN");
    }

    #[test]
    fn test_extract_channels_skips_missing_href_and_empty_name() {
        let html = r#"
            <div id="stations-index">
                <a>Bez linku</a>
                <a href="/program-tv/stacje/Pusty">   </a>
                <a href="/program-tv/stacje/TV-Puls">TV Puls</a>
            </div>
        "#;

        let channels = extract_channels(html);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].url, "/program-tv/stacje/TV-Puls");
    }

    #[test]
    fn test_extract_channels_duplicate() {
        let html = r#"
            <div id="stations-index">
                <a href="/program-tv/stacje/TVP-2">TVP 2</a>
                <a href="/program-tv/stacje/TVP-2">Dwójka</a>
            </div>
        "#;

        let channels = extract_channels(html);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "TVP 2");
    }

    #[test]
    fn test_extract_channels_multiline_text() {
        let html = r#"
            <div id="stations-index">
                <a href="/program-tv/stacje/Canal-Plus">
                    Canal+
                    Premium
                </a>
            </div>
        "#;

        let channels = extract_channels(html);
        assert_eq!(channels[0].name, "Canal+ Premium");
    }

    #[test]
    fn test_extract_channels_no_index() {
        let channels = extract_channels("<html><body><p>Przerwa techniczna</p></body></html>");
        assert!(channels.is_empty());
    }
}
