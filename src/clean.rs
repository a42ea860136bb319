//! Type coercion and validation of normalized rows into [`StationRecord`]s.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::debug;

use crate::record::{CANONICAL_FIELDS, StationRecord, VENDOR_UNKNOWN};
use crate::table::{CellValue, RawSheet};

/// Plain numbers in this range are read as a bare installation year.
const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1800..=2200;

// Day-first layouts come before their month-first twins.
static DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Year-month layouts, completed with a first day before parsing.
static YEAR_MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m"];

/// Extracts the calendar year of an installation date cell.
///
/// Returns `None` for empty cells and anything that does not parse as a
/// date; this is never an error.
pub fn install_year(cell: &CellValue) -> Option<i32> {
    match cell {
        CellValue::Date(d) => Some(d.year()),
        CellValue::Int(i) if YEAR_RANGE.contains(i) => Some(*i as i32),
        CellValue::Number(n) if n.fract() == 0.0 && YEAR_RANGE.contains(&(*n as i64)) => {
            Some(*n as i32)
        }
        CellValue::Text(s) => parse_year(s.trim()),
        _ => None,
    }
}

fn parse_year(s: &str) -> Option<i32> {
    if s.is_empty() {
        return None;
    }
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        return s.parse::<i64>().ok().filter(|y| YEAR_RANGE.contains(y)).map(|y| y as i32);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.year());
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Some(d.year());
    }
    if let Some(d) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(d.year());
    }
    // chrono needs a day, so "2019-05" is read as "2019-05-01"
    let with_day = format!("{s}-01");
    YEAR_MONTH_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(&with_day, &format!("{f}-%d")).ok())
        .map(|d| d.year())
}

fn text(sheet: &RawSheet, row: usize, field: &str) -> Option<String> {
    sheet.cell(row, field).as_text()
}

/// Builds the record for one row, or `None` when its coordinates are
/// missing or not numeric. Derived fields are computed before the
/// coordinate check, so a bad date never drops a row.
fn clean_row(sheet: &RawSheet, row: usize, extra_columns: &[(usize, &str)]) -> Option<StationRecord> {
    let latitude = sheet.cell(row, "latitude").as_f64();
    let longitude = sheet.cell(row, "longitude").as_f64();
    let id_site = text(sheet, row, "id_site").unwrap_or_default();
    let tgl_pasang_cell = sheet.cell(row, "tgl_pasang");
    let th_pengadaan = install_year(tgl_pasang_cell);
    let merk = text(sheet, row, "merk").unwrap_or_else(|| VENDOR_UNKNOWN.to_string());

    let extra = extra_columns
        .iter()
        .filter_map(|&(idx, name)| {
            sheet
                .rows
                .get(row)
                .and_then(|cells| cells.get(idx))
                .and_then(CellValue::as_text)
                .map(|value| (name.to_string(), value))
        })
        .collect::<BTreeMap<_, _>>();

    Some(StationRecord {
        id_site,
        nama_site: text(sheet, row, "nama_site"),
        provinsi: text(sheet, row, "provinsi"),
        kabupaten: text(sheet, row, "kabupaten"),
        kecamatan: text(sheet, row, "kecamatan"),
        desa: text(sheet, row, "desa"),
        latitude: latitude?,
        longitude: longitude?,
        elevasi: sheet.cell(row, "elevasi").as_f64(),
        tgl_pasang: tgl_pasang_cell.as_text(),
        th_pengadaan,
        alamat: text(sheet, row, "alamat"),
        merk,
        instansi: text(sheet, row, "instansi"),
        extra,
    })
}

/// Converts a normalized sheet into validated station records.
///
/// Rows without numeric latitude and longitude are excluded; everything else
/// is kept, in sheet order.
pub fn clean_sheet(sheet: &RawSheet) -> Vec<StationRecord> {
    let extra_columns: Vec<(usize, &str)> = sheet
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !CANONICAL_FIELDS.contains(&h.as_str()))
        .map(|(i, h)| (i, h.as_str()))
        .collect();

    let records: Vec<StationRecord> = (0..sheet.len())
        .filter_map(|row| clean_row(sheet, row, &extra_columns))
        .collect();

    let dropped = sheet.len() - records.len();
    debug!(
        rows = sheet.len(),
        kept = records.len(),
        dropped,
        "Rows cleaned"
    );
    records
}
