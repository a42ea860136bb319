//! The canonical station record.

use serde::Serialize;
use std::collections::BTreeMap;

/// Canonical column names every normalized sheet carries.
pub const CANONICAL_FIELDS: [&str; 13] = [
    "id_site",
    "nama_site",
    "provinsi",
    "kabupaten",
    "kecamatan",
    "desa",
    "latitude",
    "longitude",
    "elevasi",
    "tgl_pasang",
    "alamat",
    "merk",
    "instansi",
];

/// Vendor placeholder used when a sheet has no vendor value.
pub const VENDOR_UNKNOWN: &str = "N/A";

/// One physical station installation, after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub id_site: String,
    pub nama_site: Option<String>,
    pub provinsi: Option<String>,
    pub kabupaten: Option<String>,
    pub kecamatan: Option<String>,
    pub desa: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub elevasi: Option<f64>,
    pub tgl_pasang: Option<String>,
    /// Installation year derived from `tgl_pasang`.
    pub th_pengadaan: Option<i32>,
    pub alamat: Option<String>,
    pub merk: String,
    pub instansi: Option<String>,
    /// Columns outside the canonical set, kept as text.
    pub extra: BTreeMap<String, String>,
}

impl StationRecord {
    pub fn has_known_vendor(&self) -> bool {
        self.merk != VENDOR_UNKNOWN
    }

    /// `"<id_site> - <nama_site>"`, the label used by station pickers.
    pub fn display_label(&self) -> Option<String> {
        self.nama_site
            .as_ref()
            .map(|name| format!("{} - {}", self.id_site, name))
    }
}

/// Row of the tabular directory view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryRow {
    pub id_site: String,
    pub nama_site: Option<String>,
    pub provinsi: Option<String>,
    pub kabupaten: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub th_pengadaan: Option<i32>,
    pub merk: String,
}

impl From<&StationRecord> for DirectoryRow {
    fn from(r: &StationRecord) -> Self {
        DirectoryRow {
            id_site: r.id_site.clone(),
            nama_site: r.nama_site.clone(),
            provinsi: r.provinsi.clone(),
            kabupaten: r.kabupaten.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
            th_pengadaan: r.th_pengadaan,
            merk: r.merk.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_record(id: &str) -> StationRecord {
    StationRecord {
        id_site: id.to_string(),
        nama_site: Some(format!("Stasiun {id}")),
        provinsi: Some("Jawa Barat".to_string()),
        kabupaten: Some("Bogor".to_string()),
        kecamatan: None,
        desa: None,
        latitude: -6.6,
        longitude: 106.8,
        elevasi: Some(250.0),
        tgl_pasang: Some("2019-05-01".to_string()),
        th_pengadaan: Some(2019),
        alamat: None,
        merk: "Vaisala".to_string(),
        instansi: None,
        extra: BTreeMap::new(),
    }
}
