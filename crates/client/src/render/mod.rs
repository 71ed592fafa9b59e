//! Static HTML reports.
//!
//! Every report is a preformatted text block inside a minimal UTF-8 page,
//! written whole to `{out_dir}/{display name}.html`.

use std::fs;
use std::path::{Path, PathBuf};

use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rozklad_core::{DayBlock, Error, StopMeta, TimetableEntry};

use crate::extract::format_entry;

const HEAD: &str = r#"<html><head><meta charset="utf-8"></head>"#;

/// Bytes escaped in a relative link to a report file.
const FILE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Plain-text body of a channel report: each day's header, then its entries.
pub fn channel_body(days: &[DayBlock]) -> String {
    let mut body = String::new();
    for day in days {
        body.push('\n');
        body.push_str(&day.label);
        body.push('\n');
        for entry in &day.entries {
            body.push_str(&format_entry(entry));
            body.push('\n');
        }
    }
    body
}

/// Full HTML page for one channel.
pub fn render_channel(name: &str, days: &[DayBlock]) -> String {
    format!(
        "{HEAD}\n<body><pre>\n\n{name}\n\n{body}\n</pre></body>\n</html>",
        name = encode_text(name),
        body = encode_text(&channel_body(days))
    )
}

/// Relative href of a report file, percent-encoded as one path segment.
pub fn file_href(file: &str) -> String {
    utf8_percent_encode(file, FILE_SEGMENT).to_string()
}

/// Index page linking every generated report, as `(display name, file name)`.
pub fn render_index(reports: &[(String, String)]) -> String {
    let links: String = reports
        .iter()
        .map(|(name, file)| {
            format!("<a href=\"{}\">{}</a>\n<br>", encode_double_quoted_attribute(&file_href(file)), encode_text(name))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{HEAD}<body>\nindex<br>\n{links}\n</body></html>")
}

/// Full HTML page for one stop/line timetable.
pub fn render_timetable(meta: &StopMeta, entries: &[TimetableEntry]) -> String {
    let mut body = format!("Przystanek {}. Kierunek {}\n", meta.stop_name, meta.destination_stop);
    for entry in entries {
        body.push_str(&entry.to_string());
        body.push('\n');
    }
    format!("{HEAD}<body><pre>\n{}</pre></body></html>", encode_text(&body))
}

/// File name of a report: the display name with path separators replaced.
pub fn file_name(display: &str) -> String {
    let safe: String = display
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '-' } else { c })
        .collect();
    format!("{safe}.html")
}

/// Writes whole report files into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    /// Create the writer, creating `out_dir` if needed.
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir)?;
        Ok(Self { out_dir })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write `html` as the report for `display`, replacing any previous file.
    pub fn write(&self, display: &str, html: &str) -> Result<PathBuf, Error> {
        let path = self.out_dir.join(file_name(display));
        fs::write(&path, html)?;
        tracing::info!("wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rozklad_core::ScheduleEntry;
    use url::Url;

    fn day(label: &str, entries: &[(&str, &str, &str)]) -> DayBlock {
        DayBlock {
            date: NaiveDate::from_ymd_opt(2024, 4, 11).unwrap(),
            label: label.to_string(),
            entries: entries
                .iter()
                .map(|(t, c, n)| ScheduleEntry { time: t.to_string(), category: c.to_string(), title: n.to_string() })
                .collect(),
        }
    }

    #[test]
    fn test_render_channel_escapes_markup() {
        let days = vec![day("piątek, 12 kwietnia 2024", &[("21:00", "film", "<Nic> & \"nikt\"")])];
        let html = render_channel("Kino <PL>", &days);

        assert!(html.contains("\nKino &lt;PL&gt;\n"));
        assert!(html.contains("21:00. film. &lt;Nic&gt; &amp; \"nikt\"\n"));
    }

    #[test]
    fn test_channel_body() {
        let days = vec![
            day("Dzisiaj, czwartek, 11 kwietnia 2024", &[("06:00", "magazyn", "Kawa czy herbata?")]),
            day("piątek, 12 kwietnia 2024", &[("19:30", "", "Wiadomości"), ("20:25", "serial", "Klan")]),
        ];

        assert_eq!(
            channel_body(&days),
            "\nDzisiaj, czwartek, 11 kwietnia 2024\n06:00. magazyn. Kawa czy herbata?\n\
             \npiątek, 12 kwietnia 2024\n19:30. . Wiadomości\n20:25. serial. Klan\n"
        );
    }

    #[test]
    fn test_render_channel_template() {
        let days = vec![day("Dzisiaj, czwartek, 11 kwietnia 2024", &[("06:00", "magazyn", "Tom & Jerry")])];
        let html = render_channel("TVP 1", &days);

        assert!(html.starts_with("<html><head><meta charset=\"utf-8\"></head>\n<body><pre>\n\nTVP 1\n\n"));
        assert!(html.contains("06:00. magazyn. Tom &amp; Jerry\n"));
        assert!(html.ends_with("\n</pre></body>\n</html>"));
    }

    #[test]
    fn test_render_channel_empty() {
        let html = render_channel("TVN", &[]);
        assert_eq!(html, "<html><head><meta charset=\"utf-8\"></head>\n<body><pre>\n\nTVN\n\n\n</pre></body>\n</html>");
    }

    #[test]
    fn test_render_index() {
        let reports = vec![
            ("TVP 1".to_string(), "TVP 1.html".to_string()),
            ("AXN/Black".to_string(), "AXN-Black.html".to_string()),
        ];
        let html = render_index(&reports);

        assert!(html.contains("index<br>"));
        assert!(html.contains("<a href=\"TVP%201.html\">TVP 1</a>\n<br>"));
        assert!(html.contains("<a href=\"AXN-Black.html\">AXN/Black</a>\n<br>"));
    }

    #[test]
    fn test_index_links_resolve_to_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        let index = Url::from_directory_path(dir.path()).unwrap().join("index.html").unwrap();

        for name in ["Fox #1", "100% Polsat?", "Kino&Seriale", "Wiadomości"] {
            let path = writer.write(name, "x").unwrap();
            let html = render_index(&[(name.to_string(), file_name(name))]);

            let href = html.split("href=\"").nth(1).and_then(|rest| rest.split('"').next()).unwrap();
            let target = index.join(href).unwrap();

            assert_eq!(target.fragment(), None, "{name}");
            assert_eq!(target.query(), None, "{name}");
            assert_eq!(target.to_file_path().unwrap(), path, "{name}");
        }
    }

    #[test]
    fn test_file_href() {
        assert_eq!(file_href("Fox #1.html"), "Fox%20%231.html");
        assert_eq!(file_href("59.CHOPINA_CENTRUM.html"), "59.CHOPINA_CENTRUM.html");
        assert_eq!(file_href("TVP ABC.html"), "TVP%20ABC.html");
    }

    #[test]
    fn test_render_timetable() {
        let meta = StopMeta {
            other_lines: vec![53, 55],
            stop_name: "Chopina-Centrum".into(),
            valid_since: NaiveDate::from_ymd_opt(2019, 9, 1).unwrap(),
            destination_stop: "Staromorzysławska-końcowy.".into(),
            stops: vec![],
        };
        let entries = vec![TimetableEntry::new(6, "33"), TimetableEntry::new(7, "18a")];

        assert_eq!(
            render_timetable(&meta, &entries),
            "<html><head><meta charset=\"utf-8\"></head><body><pre>\n\
             Przystanek Chopina-Centrum. Kierunek Staromorzysławska-końcowy.\n6:33\n7:18a\n</pre></body></html>"
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("TVP 1"), "TVP 1.html");
        assert_eq!(file_name("AXN/Black"), "AXN-Black.html");
        assert_eq!(file_name("59.CHOPINA_CENTRUM"), "59.CHOPINA_CENTRUM.html");
    }

    #[test]
    fn test_report_writer_writes_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("out")).unwrap();

        let path = writer.write("TVN", "first").unwrap();
        assert_eq!(path, dir.path().join("out").join("TVN.html"));
        writer.write("TVN", "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
