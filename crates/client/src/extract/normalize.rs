//! Text normalization for listing lines.
//!
//! Episode brackets are rewritten into Polish prose, times are zero-padded,
//! and dates are spelled out the way the reports print them.

use std::sync::LazyLock;

use chrono::{Locale, NaiveDate};
use regex::Regex;
use rozklad_core::ScheduleEntry;

static EPISODE_OF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" \((\d+)/(\d+)\)").expect("invalid regex"));
static EPISODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" \((\d+)\)").expect("invalid regex"));

const TIME_WIDTH: usize = 5;

/// Weekday, day, genitive month and year, e.g. `czwartek, 11 kwietnia 2024`.
const DATE_FORMAT_PL: &str = "%A, %-d %B %Y";

/// Rewrite episode markers in a programme title.
///
/// `" (3/7)"` becomes `". odcinek 3 z 7"`, then `" (12)"` becomes
/// `". odcinek 12"`. The fraction form is rewritten first.
pub fn normalize_title(title: &str) -> String {
    let title = EPISODE_OF.replace_all(title, ". odcinek ${1} z ${2}");
    EPISODE.replace_all(&title, ". odcinek ${1}").into_owned()
}

/// Left-pad a time with `'0'` to five characters (`9:05` → `09:05`).
///
/// Strings already five characters or longer are returned unchanged.
pub fn pad_time(time: &str) -> String {
    format!("{:0>width$}", time, width = TIME_WIDTH)
}

/// One report line: `"%4s. %s. %s"` of time, category and title.
pub fn format_entry(entry: &ScheduleEntry) -> String {
    format!("{:>4}. {}. {}", entry.time, entry.category, entry.title)
}

/// Full Polish date, e.g. `czwartek, 11 kwietnia 2024`.
pub fn format_date_pl(date: NaiveDate) -> String {
    date.format_localized(DATE_FORMAT_PL, Locale::pl_PL).to_string()
}

/// Header line for a day block; today's gets a `Dzisiaj, ` lead-in.
pub fn day_header(date: NaiveDate, today: NaiveDate) -> String {
    if date == today { format!("Dzisiaj, {}", format_date_pl(date)) } else { format_date_pl(date) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_title_fraction() {
        assert_eq!(normalize_title("M jak miłość (3/7)"), "M jak miłość. odcinek 3 z 7");
    }

    #[test]
    fn test_normalize_title_single() {
        assert_eq!(normalize_title("Na Wspólnej (12)"), "Na Wspólnej. odcinek 12");
    }

    #[test]
    fn test_normalize_title_mid_string() {
        assert_eq!(normalize_title("Ranczo (5/13) - powtórka"), "Ranczo. odcinek 5 z 13 - powtórka");
    }

    #[test]
    fn test_normalize_title_untouched() {
        assert_eq!(normalize_title("Wiadomości"), "Wiadomości");
        assert_eq!(normalize_title("Film (USA)"), "Film (USA)");
        assert_eq!(normalize_title("Klan(12)"), "Klan(12)");
    }

    #[test]
    fn test_normalize_title_both_forms() {
        assert_eq!(normalize_title("Serial (2/10) (99)"), "Serial. odcinek 2 z 10. odcinek 99");
    }

    #[test]
    fn test_pad_time() {
        assert_eq!(pad_time("9:05"), "09:05");
        assert_eq!(pad_time("19:05"), "19:05");
        assert_eq!(pad_time(""), "00000");
    }

    #[test]
    fn test_pad_time_idempotent() {
        for time in ["0:00", "9:05", "23:59"] {
            let once = pad_time(time);
            assert_eq!(once.chars().count(), 5);
            assert_eq!(pad_time(&once), once);
        }
    }

    #[test]
    fn test_format_entry() {
        let entry = ScheduleEntry { time: "09:05".into(), category: "serial".into(), title: "Klan".into() };
        assert_eq!(format_entry(&entry), "09:05. serial. Klan");

        let entry = ScheduleEntry { time: "20:00".into(), category: String::new(), title: "Fakty".into() };
        assert_eq!(format_entry(&entry), "20:00. . Fakty");
    }

    #[test]
    fn test_format_date_pl() {
        assert_eq!(format_date_pl(date(2024, 4, 11)), "czwartek, 11 kwietnia 2024");
        assert_eq!(format_date_pl(date(2026, 10, 16)), "piątek, 16 października 2026");
        assert_eq!(format_date_pl(date(2025, 1, 5)), "niedziela, 5 stycznia 2025");
        assert_eq!(format_date_pl(date(2024, 9, 30)), "poniedziałek, 30 września 2024");
        assert_eq!(format_date_pl(date(2024, 5, 1)), "środa, 1 maja 2024");
    }

    #[test]
    fn test_day_header_today() {
        let today = date(2024, 4, 11);
        assert_eq!(day_header(today, today), "Dzisiaj, czwartek, 11 kwietnia 2024");
    }

    #[test]
    fn test_day_header_other_days() {
        let today = date(2024, 4, 11);
        for offset in 1..=3 {
            let day = today + chrono::Days::new(offset);
            let header = day_header(day, today);
            let full = format_date_pl(day);
            assert!(!header.starts_with("Dzisiaj"));
            assert!(header.starts_with(&day.format_localized("%A", Locale::pl_PL).to_string()));
            assert!(header.ends_with(&full));
            assert!(day_header(today, today).ends_with(&format_date_pl(today)));
        }
    }
}
