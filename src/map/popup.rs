//! Marker labels: hover tooltip and the HTML popup card.

use crate::record::StationRecord;

const NOT_AVAILABLE: &str = "N/A";

/// Escapes text for inclusion in HTML content or attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_na(value: Option<&str>) -> String {
    escape_html(value.unwrap_or(NOT_AVAILABLE))
}

/// Hover label, HTML-escaped since Leaflet renders tooltips as markup.
pub fn tooltip(site: &StationRecord) -> String {
    or_na(site.nama_site.as_deref())
}

/// Popup card with name, id, province, regency, elevation, installation
/// year and vendor. Missing values read `N/A`.
pub fn popup_html(site: &StationRecord) -> String {
    let elevation = site
        .elevasi
        .map_or_else(|| NOT_AVAILABLE.to_string(), |e| format!("{e}"));
    let year = site
        .th_pengadaan
        .map_or_else(|| NOT_AVAILABLE.to_string(), |y| y.to_string());

    format!(
        concat!(
            r#"<div style="width: 300px; font-family: Arial, sans-serif; font-size: 14px;">"#,
            r#"<h4 style="margin-bottom: 10px; color: #007BFF;">{name}</h4><hr style="margin: 5px 0;">"#,
            "<b>ID Stasiun:</b> {id}<br>",
            "<b>Provinsi:</b> {provinsi}<br>",
            "<b>Kab/Kota:</b> {kabupaten}<br>",
            "<b>Elevasi:</b> {elevation} m<br>",
            "<b>Tahun Pasang:</b> {year}<br>",
            "<b>Vendor:</b> {vendor}",
            "</div>"
        ),
        name = or_na(site.nama_site.as_deref()),
        id = escape_html(&site.id_site),
        provinsi = or_na(site.provinsi.as_deref()),
        kabupaten = or_na(site.kabupaten.as_deref()),
        elevation = escape_html(&elevation),
        year = year,
        vendor = escape_html(&site.merk),
    )
}
