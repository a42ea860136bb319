//! Schema normalization: map historical column names onto the canonical set.

use crate::record::CANONICAL_FIELDS;
use crate::table::{CellValue, RawSheet};
use tracing::debug;

/// Historical column names and the canonical field each one stands for.
///
/// Canonical names are not listed; they already map to themselves.
static COLUMN_SYNONYMS: &[(&str, &str)] = &[
    ("id_station", "id_site"),
    ("name_station", "nama_site"),
    ("nama_propinsi", "provinsi"),
    ("nama_kota", "kabupaten"),
    ("kelurahan", "desa"),
    ("latt_station", "latitude"),
    ("long_station", "longitude"),
    ("elv_station", "elevasi"),
    ("th_pengadaan", "tgl_pasang"),
    ("addr_instansi", "alamat"),
    ("nama_vendor", "merk"),
];

/// Canonical name for a column header, or `None` for unrecognized columns.
pub fn canonical_name(header: &str) -> Option<&'static str> {
    let header = header.trim();
    if let Some(&canonical) = CANONICAL_FIELDS.iter().find(|&&c| c == header) {
        return Some(canonical);
    }
    COLUMN_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == header)
        .map(|(_, canonical)| *canonical)
}

/// Renames known columns to their canonical names and appends any canonical
/// column the sheet lacks, filled with empty cells.
///
/// Unrecognized columns pass through untouched. When two headers map to the
/// same canonical name the leftmost one takes it and the later one keeps its
/// original name.
pub fn normalize_columns(mut sheet: RawSheet) -> RawSheet {
    // rows may bypass RawSheet::new; align them before appending columns
    let width = sheet.headers.len();
    for row in sheet.rows.iter_mut() {
        row.resize(width, CellValue::Empty);
    }

    let mut claimed: Vec<&'static str> = Vec::new();
    let mut renamed = 0usize;

    for header in sheet.headers.iter_mut() {
        let Some(canonical) = canonical_name(header) else {
            continue;
        };
        if claimed.contains(&canonical) {
            debug!(column = %header, canonical, "Duplicate column for canonical field, keeping original name");
            continue;
        }
        claimed.push(canonical);
        if header.as_str() != canonical {
            renamed += 1;
            *header = canonical.to_string();
        }
    }

    let missing: Vec<&str> = CANONICAL_FIELDS
        .iter()
        .copied()
        .filter(|c| !claimed.contains(c))
        .collect();

    for field in &missing {
        sheet.headers.push(field.to_string());
        for row in sheet.rows.iter_mut() {
            row.push(CellValue::Empty);
        }
    }

    debug!(renamed, added = missing.len(), "Columns normalized");
    sheet
}
