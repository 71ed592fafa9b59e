//! Bus timetable data model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One departure: an hour and the raw minute token from the timetable cell.
///
/// The token keeps any annotation suffix (`18a`, `11ah`, `23#`) or a bare
/// `-` exactly as printed; its meaning is not decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub hour: u32,
    pub minute: String,
}

impl TimetableEntry {
    pub fn new(hour: u32, minute: impl Into<String>) -> Self {
        Self { hour, minute: minute.into() }
    }
}

impl fmt::Display for TimetableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hour, self.minute)
    }
}

/// Header data of a stop/line timetable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopMeta {
    /// Other lines serving the stop.
    pub other_lines: Vec<u32>,
    pub stop_name: String,
    pub valid_since: NaiveDate,
    pub destination_stop: String,
    /// Stops along the route after this one.
    pub stops: Vec<String>,
}

/// Stop codes with a readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownStop {
    Chopina1,
    ChopinaCentrum,
    PaderewskiegoSzymanowskiegoPilsudskiego,
}

impl KnownStop {
    pub const ALL: [KnownStop; 3] =
        [KnownStop::Chopina1, KnownStop::ChopinaCentrum, KnownStop::PaderewskiegoSzymanowskiegoPilsudskiego];

    /// Stop code as used in the `ID` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            KnownStop::Chopina1 => "331-01",
            KnownStop::ChopinaCentrum => "331-02",
            KnownStop::PaderewskiegoSzymanowskiegoPilsudskiego => "336-01",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KnownStop::Chopina1 => "CHOPINA1",
            KnownStop::ChopinaCentrum => "CHOPINA_CENTRUM",
            KnownStop::PaderewskiegoSzymanowskiegoPilsudskiego => "PADEREWSKIEGO_SZYMANOWSKIEGO__PILSUDSKIEGO",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl FromStr for KnownStop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stop| stop.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown stop name: {s}"))
    }
}

/// A stop given on the command line: either a known name or a raw code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRef {
    pub code: String,
    /// Name used in report file names.
    pub display: String,
}

impl StopRef {
    /// Resolve a stop name (`CHOPINA_CENTRUM`) or code (`331-02`).
    ///
    /// Known codes are displayed by name; unknown codes are kept as given.
    pub fn resolve(input: &str) -> Self {
        let input = input.trim();
        if let Ok(stop) = input.parse::<KnownStop>() {
            return Self { code: stop.code().into(), display: stop.name().into() };
        }
        match KnownStop::from_code(input) {
            Some(stop) => Self { code: stop.code().into(), display: stop.name().into() },
            None => Self { code: input.into(), display: input.into() },
        }
    }
}

/// A stop and the lines to report for it, as listed in the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRoute {
    /// Known stop name or raw stop code.
    pub stop: String,
    pub lines: Vec<String>,
}

impl BusRoute {
    pub fn new(stop: impl Into<String>, lines: &[&str]) -> Self {
        Self { stop: stop.into(), lines: lines.iter().map(|l| l.to_string()).collect() }
    }

    pub fn stop_ref(&self) -> StopRef {
        StopRef::resolve(&self.stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display_keeps_suffix() {
        assert_eq!(TimetableEntry::new(7, "18a").to_string(), "7:18a");
        assert_eq!(TimetableEntry::new(19, "-").to_string(), "19:-");
    }

    #[test]
    fn test_known_stop_round_trip() {
        for stop in KnownStop::ALL {
            assert_eq!(stop.name().parse::<KnownStop>().unwrap(), stop);
            assert_eq!(KnownStop::from_code(stop.code()), Some(stop));
        }
    }

    #[test]
    fn test_known_stop_parse_case_insensitive() {
        assert_eq!("chopina_centrum".parse::<KnownStop>().unwrap(), KnownStop::ChopinaCentrum);
        assert!("DWORZEC".parse::<KnownStop>().is_err());
    }

    #[test]
    fn test_stop_ref_resolve() {
        let by_name = StopRef::resolve("CHOPINA_CENTRUM");
        assert_eq!(by_name.code, "331-02");
        assert_eq!(by_name.display, "CHOPINA_CENTRUM");

        let by_code = StopRef::resolve("336-01");
        assert_eq!(by_code.display, "PADEREWSKIEGO_SZYMANOWSKIEGO__PILSUDSKIEGO");

        let unknown = StopRef::resolve(" 160-01 ");
        assert_eq!(unknown.code, "160-01");
        assert_eq!(unknown.display, "160-01");
    }

    #[test]
    fn test_bus_route_stop_ref() {
        let route = BusRoute::new("PADEREWSKIEGO_SZYMANOWSKIEGO__PILSUDSKIEGO", &["53"]);
        assert_eq!(route.stop_ref().code, "336-01");
        assert_eq!(route.lines, vec!["53"]);
    }
}
