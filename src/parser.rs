//! Spreadsheet parsing with `calamine`.

use calamine::{Data, Range, Sheets, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;

use crate::table::{CellValue, RawSheet};

pub type WorkbookSheets = Sheets<Cursor<Vec<u8>>>;

/// Opens an in-memory workbook, detecting xlsx, xls, xlsb and ods.
///
/// # Errors
///
/// Returns an error if the bytes are not a spreadsheet calamine recognizes.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<WorkbookSheets, calamine::Error> {
    open_workbook_auto_from_rs(Cursor::new(bytes))
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Converts a calamine cell. Date-formatted cells become [`CellValue::Date`];
/// error cells are treated as empty.
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from_text(s),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Number(dt.as_f64()), CellValue::Date),
        Data::DateTimeIso(s) => parse_iso(s).map_or_else(|| CellValue::from_text(s), CellValue::Date),
        Data::DurationIso(s) => CellValue::from_text(s),
    }
}

/// Converts a worksheet range into a [`RawSheet`], reading the first row as
/// the header. Blank header cells are named `Unnamed: <index>`.
pub fn range_to_sheet(range: &Range<Data>) -> RawSheet {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return RawSheet::default();
    };

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cell_value(cell)
                .as_text()
                .unwrap_or_else(|| format!("Unnamed: {i}"))
        })
        .collect();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    RawSheet::new(headers, data)
}
