//! Table grids of a bus timetable page.
//!
//! The timetable CMS lays a stop/line page out as a stack of `<table>`s with
//! no ids or classes, so fields are read by fixed table/column/row offsets:
//!
//! | field              | table | column | rows |
//! |--------------------|-------|--------|------|
//! | other lines        | 1     | all    | 0    |
//! | stop name          | 2     | 0      | 0    |
//! | valid since        | 4     | 3      | 0    |
//! | destination stop   | 4     | 2      | 1    |
//! | hours / minutes    | 6     | 0 / 1  | 2..  |
//! | route stops        | 8 (9 tables) or 7 (8 tables) | 1 | 1.. |

use std::sync::LazyLock;

use chrono::NaiveDate;
use rozklad_core::{Error, StopMeta, TimetableEntry};
use scraper::{ElementRef, Html, Selector};

use super::element_text;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("invalid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("invalid selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").expect("invalid selector"));

const MAX_SPAN: usize = 1000;

const TIMETABLE_TABLE: usize = 6;
const TIMETABLE_FIRST_ROW: usize = 2;

/// A table as a grid of whitespace-collapsed cell texts.
///
/// `colspan`/`rowspan` cells are repeated into every slot they cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Column `col` across all rows; short rows read as empty cells.
    pub fn column(&self, col: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.get(col).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// Every `<table>` of the page in document order, nested ones included.
///
/// A table only owns the rows and cells that are not inside a nested table;
/// a cell's text still includes any table nested in it.
pub fn parse_tables(html: &str) -> Vec<Table> {
    let document = Html::parse_document(html);
    document.select(&TABLE).map(parse_table).collect()
}

fn parse_table(table: ElementRef<'_>) -> Table {
    let mut rows = Vec::new();
    let mut spans: Vec<Option<(String, usize)>> = Vec::new();

    for tr in table.select(&ROW).filter(|tr| is_owned_by(*tr, "table", table)) {
        let mut row: Vec<String> = Vec::new();

        for cell in tr.select(&CELL).filter(|c| is_owned_by(*c, "tr", tr)) {
            while let Some(text) = take_span(&mut spans, row.len()) {
                row.push(text);
            }

            let text = element_text(cell);
            let colspan = span_attr(cell, "colspan");
            let rowspan = span_attr(cell, "rowspan");

            for _ in 0..colspan {
                let col = row.len();
                if rowspan > 1 {
                    if spans.len() <= col {
                        spans.resize(col + 1, None);
                    }
                    spans[col] = Some((text.clone(), rowspan - 1));
                }
                row.push(text.clone());
            }
        }

        let mut col = row.len();
        while col < spans.len() {
            if let Some(text) = take_span(&mut spans, col) {
                row.resize(col, String::new());
                row.push(text);
            }
            col += 1;
        }

        rows.push(row);
    }

    Table { rows }
}

/// Whether the nearest `ancestor_name` element above `element` is `owner`.
fn is_owned_by(element: ElementRef<'_>, ancestor_name: &str, owner: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == ancestor_name)
        .is_some_and(|a| a.id() == owner.id())
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
        .min(MAX_SPAN)
}

fn take_span(spans: &mut [Option<(String, usize)>], col: usize) -> Option<String> {
    let slot = spans.get_mut(col)?;
    let (text, left) = {
        let (text, left) = slot.as_mut()?;
        *left -= 1;
        (text.clone(), *left)
    };
    if left == 0 {
        *slot = None;
    }
    Some(text)
}

fn table_at(tables: &[Table], index: usize) -> Result<&Table, Error> {
    tables
        .get(index)
        .ok_or_else(|| Error::ExtractFailed(format!("table {} missing ({} tables on page)", index, tables.len())))
}

fn cell_at(tables: &[Table], table: usize, col: usize, row: usize) -> Result<&str, Error> {
    table_at(tables, table)?
        .cell(col, row)
        .ok_or_else(|| Error::ExtractFailed(format!("table {} has no cell at column {}, row {}", table, col, row)))
}

fn token<'a>(text: &'a str, index: usize, field: &str) -> Result<&'a str, Error> {
    text.split_whitespace()
        .nth(index)
        .ok_or_else(|| Error::ExtractFailed(format!("{field}: no word {index} in {text:?}")))
}

/// Index of the table listing the route's stops.
///
/// Only the two observed layouts are accepted; any other table count is
/// reported instead of guessed.
fn stops_table(tables: &[Table]) -> Result<usize, Error> {
    match tables.len() {
        9 => Ok(8),
        8 => Ok(7),
        n => Err(Error::UnsupportedLayout(format!("{n} tables on page, expected 8 or 9"))),
    }
}

/// Read the stop header fields of a timetable page.
pub fn extract_meta(tables: &[Table]) -> Result<StopMeta, Error> {
    let stops_index = stops_table(tables)?;

    let other_lines = table_at(tables, 1)?
        .rows()
        .first()
        .ok_or_else(|| Error::ExtractFailed("table 1 has no rows".into()))?
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| {
            c.parse::<u32>()
                .map_err(|_| Error::ExtractFailed(format!("other_lines: {c:?} is not a line number")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let stop_name = token(cell_at(tables, 2, 0, 0)?, 1, "stop_name")?.to_string();

    let valid_since = token(cell_at(tables, 4, 3, 0)?, 2, "valid_since")?;
    let valid_since = NaiveDate::parse_from_str(valid_since, "%Y-%m-%d")
        .map_err(|e| Error::ExtractFailed(format!("valid_since: {valid_since:?}: {e}")))?;

    let destination_stop = token(cell_at(tables, 4, 2, 1)?, 1, "destination_stop")?.to_string();

    let stops = table_at(tables, stops_index)?
        .column(1)
        .into_iter()
        .skip(1)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(StopMeta { other_lines, stop_name, valid_since, destination_stop, stops })
}

/// Read the departures of a timetable page, one entry per minute token.
///
/// Dots are dropped from tokens; any other suffix is kept as printed.
pub fn extract_timetable(tables: &[Table]) -> Result<Vec<TimetableEntry>, Error> {
    let table = table_at(tables, TIMETABLE_TABLE)?;
    let hours = table.column(0);
    let minutes = table.column(1);

    let mut entries = Vec::new();

    for (hour, cell) in hours.iter().zip(minutes.iter()).skip(TIMETABLE_FIRST_ROW) {
        if hour.is_empty() {
            continue;
        }
        let hour: u32 = hour
            .parse()
            .map_err(|_| Error::ExtractFailed(format!("timetable: {hour:?} is not an hour")))?;

        for raw in cell.split_whitespace() {
            let minute = raw.replace('.', "");
            if minute.is_empty() {
                continue;
            }
            entries.push(TimetableEntry { hour, minute });
        }
    }

    Ok(entries)
}
