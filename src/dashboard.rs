//! Pipeline façade consumed by a UI shell.
//!
//! [`Dashboard`] discovers sheets once, then answers each selection with a
//! [`DashboardView`] holding every output the shell renders. Catalogs are
//! built by [`build_catalog`], a pure function of the source, and memoized
//! per (source, sheet). Building a view never fails: load problems become
//! [`Notice`]s next to an empty catalog.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::analytics::{Summary, summarize};
use crate::cache::{CacheKey, CatalogCache};
use crate::catalog::{SiteOption, StationCatalog};
use crate::category::DeviceCategory;
use crate::config::Settings;
use crate::error::LoadError;
use crate::map::{LegendEntry, MapState, legend, render_map};
use crate::record::StationRecord;
use crate::source::WorkbookSource;
use crate::stats::NetworkStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// User-visible message attached to a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Illustrative image lookup result for a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum AssetStatus {
    Found(PathBuf),
    Missing(PathBuf),
    NotConfigured,
}

/// Everything the shell shows for one sheet and station selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub sheet: String,
    pub category: Option<DeviceCategory>,
    pub catalog: Arc<StationCatalog>,
    pub stats: NetworkStats,
    pub map: MapState,
    pub summary: Summary,
    pub selected: Option<StationRecord>,
    pub site_options: Vec<SiteOption>,
    pub legend: Vec<LegendEntry>,
    pub image: AssetStatus,
    pub notices: Vec<Notice>,
}

impl DashboardView {
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Reads, normalizes and cleans one sheet.
#[tracing::instrument(skip(source), fields(source = source.identity()))]
pub fn build_catalog<S: WorkbookSource + ?Sized>(
    source: &S,
    sheet: &str,
) -> Result<StationCatalog, LoadError> {
    let raw = source.read_sheet(sheet)?;
    let rows = raw.len();
    let catalog = StationCatalog::from_raw(sheet, raw);
    info!(rows, stations = catalog.len(), "Catalog built");
    Ok(catalog)
}

/// Image status for a sheet's category.
pub fn resolve_image(settings: &Settings, category: Option<DeviceCategory>) -> AssetStatus {
    match category {
        None => AssetStatus::NotConfigured,
        Some(c) => {
            let path = settings.asset_path(c);
            if path.is_file() {
                AssetStatus::Found(path)
            } else {
                AssetStatus::Missing(path)
            }
        }
    }
}

pub struct Dashboard<S> {
    source: S,
    settings: Settings,
    sheet_names: Vec<String>,
    cache: CatalogCache,
}

impl<S: WorkbookSource> Dashboard<S> {
    /// Discovers the workbook's sheets. A source without readable sheets is a
    /// blocking error.
    pub fn open(source: S, settings: Settings) -> Result<Self, LoadError> {
        let sheet_names = source.sheet_names()?;
        if sheet_names.is_empty() {
            return Err(LoadError::unreadable(
                source.identity(),
                "workbook has no sheets",
            ));
        }
        info!(source = source.identity(), sheets = ?sheet_names, "Dashboard opened");

        Ok(Self {
            source,
            settings,
            sheet_names,
            cache: CatalogCache::new(),
        })
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cached_catalogs(&self) -> usize {
        self.cache.len()
    }

    /// Catalog for a discovered sheet, built on first use.
    pub fn catalog(&mut self, sheet: &str) -> Result<Arc<StationCatalog>, LoadError> {
        if !self.sheet_names.iter().any(|s| s == sheet) {
            return Err(LoadError::SheetNotFound {
                sheet: sheet.to_string(),
                available: self.sheet_names.clone(),
            });
        }

        let key = CacheKey::new(self.source.identity(), sheet);
        let source = &self.source;
        self.cache.get_or_load(key, || build_catalog(source, sheet))
    }

    /// Assembles the view for a sheet and an optional selected station id.
    #[tracing::instrument(skip(self))]
    pub fn view(&mut self, sheet: &str, selected_id: Option<&str>) -> DashboardView {
        let mut notices = Vec::new();

        let catalog = match self.catalog(sheet) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Sheet load failed, showing empty catalog");
                notices.push(Notice::error(e.to_string()));
                Arc::new(StationCatalog::empty(sheet))
            }
        };

        if catalog.is_empty() && notices.is_empty() {
            notices.push(Notice::warning(format!(
                "No valid station data in sheet '{sheet}'"
            )));
        }

        let category = DeviceCategory::from_sheet_name(sheet);

        let selected = selected_id.and_then(|id| catalog.find(id)).cloned();
        if let (Some(id), None, false) = (selected_id, &selected, catalog.is_empty()) {
            notices.push(Notice::warning(format!(
                "Station '{id}' not found in sheet '{sheet}'"
            )));
        }

        let image = resolve_image(&self.settings, category);
        match &image {
            AssetStatus::Found(_) => {}
            AssetStatus::Missing(path) => notices.push(Notice::warning(format!(
                "Image file not found: '{}'",
                path.display()
            ))),
            AssetStatus::NotConfigured => notices.push(Notice::info(format!(
                "No image configured for sheet '{sheet}'"
            ))),
        }

        DashboardView {
            sheet: sheet.to_string(),
            category,
            stats: NetworkStats::from_catalog(&catalog),
            map: render_map(&catalog, selected_id, category),
            summary: summarize(&catalog),
            selected,
            site_options: catalog.site_options(),
            legend: legend(&self.sheet_names),
            image,
            notices,
            catalog,
        }
    }
}
