use serde::Serialize;

use crate::analytics::utility::pct;
use crate::catalog::StationCatalog;

/// Headline metrics for a sheet and how complete its optional fields are.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub sheet: String,
    pub total_stations: usize,
    pub provinces: usize,
    /// Earliest installation year in the sheet.
    pub active_since: Option<i32>,

    // field coverage
    pub with_name: usize,
    pub with_province: usize,
    pub with_elevation: usize,
    pub with_install_year: usize,
    pub with_vendor: usize,
}

impl NetworkStats {
    pub fn from_catalog(catalog: &StationCatalog) -> Self {
        let mut s = NetworkStats {
            sheet: catalog.sheet().to_string(),
            total_stations: catalog.len(),
            provinces: catalog.distinct_count(|r| r.provinsi.clone()),
            active_since: catalog.min_of(|r| r.th_pengadaan),
            ..Default::default()
        };

        for r in catalog.iter() {
            if r.nama_site.is_some() {
                s.with_name += 1;
            }

            if r.provinsi.is_some() {
                s.with_province += 1;
            }

            if r.elevasi.is_some() {
                s.with_elevation += 1;
            }

            if r.th_pengadaan.is_some() {
                s.with_install_year += 1;
            }

            if r.has_known_vendor() {
                s.with_vendor += 1;
            }
        }

        s
    }

    pub fn install_year_pct(&self) -> f64 {
        pct(self.with_install_year, self.total_stations)
    }

    pub fn vendor_pct(&self) -> f64 {
        pct(self.with_vendor, self.total_stations)
    }

    /// "Active since" as shown on the dashboard, `N/A` when no year is known.
    pub fn active_since_label(&self) -> String {
        self.active_since
            .map_or_else(|| "N/A".to_string(), |y| y.to_string())
    }
}
