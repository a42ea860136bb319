//! Output formatting and persistence for dashboard views.
//!
//! Supports pretty-printing, JSON files, the directory CSV and the Leaflet
//! map page.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::catalog::StationCatalog;
use crate::dashboard::{DashboardView, Notice, NoticeLevel};
use crate::map::html::leaflet_page;
use csv::WriterBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs each notice at the level matching its severity.
pub fn log_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => info!(notice = %notice.message, "Notice"),
            NoticeLevel::Warning => warn!(notice = %notice.message, "Notice"),
            NoticeLevel::Error => error!(notice = %notice.message, "Notice"),
        }
    }
}

/// Writes a value as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Writes the directory view of a catalog as CSV, header included.
pub fn write_directory_csv(path: &Path, catalog: &StationCatalog) -> Result<()> {
    debug!(path = %path.display(), rows = catalog.len(), "Writing directory CSV");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in catalog.directory() {
        writer.serialize(row)?;
    }
    // serialize() only emits the header with the first row
    if catalog.is_empty() {
        writer.write_record([
            "id_site",
            "nama_site",
            "provinsi",
            "kabupaten",
            "latitude",
            "longitude",
            "th_pengadaan",
            "merk",
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes every file of a rendered view into `out_dir` and returns their paths.
pub fn write_view(out_dir: &Path, view: &DashboardView) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut written = Vec::new();

    let page = leaflet_page(
        &format!("Peta Sebaran Stasiun: {}", view.sheet),
        &view.map,
        &view.legend,
    )?;
    let map_html = out_dir.join("map.html");
    std::fs::write(&map_html, page)?;
    written.push(map_html);

    let map_json = out_dir.join("map.json");
    write_json(&map_json, &view.map)?;
    written.push(map_json);

    let summary_json = out_dir.join("summary.json");
    write_json(
        &summary_json,
        &serde_json::json!({
            "sheet": view.sheet,
            "stats": view.stats,
            "summary": view.summary,
            "notices": view.notices,
        }),
    )?;
    written.push(summary_json);

    let directory_csv = out_dir.join("directory.csv");
    write_directory_csv(&directory_csv, &view.catalog)?;
    written.push(directory_csv);

    if let Some(selected) = &view.selected {
        let detail_json = out_dir.join("detail.json");
        write_json(&detail_json, selected)?;
        written.push(detail_json);
    }

    info!(out_dir = %out_dir.display(), files = written.len(), "View written");
    Ok(written)
}
