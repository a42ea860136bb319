//! Read-only station catalog for one selected sheet.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;
use tracing::warn;

use crate::category::DeviceCategory;
use crate::clean::clean_sheet;
use crate::normalize::normalize_columns;
use crate::record::{DirectoryRow, StationRecord};
use crate::table::RawSheet;

/// Entry of the station picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub id_site: String,
    pub display: String,
}

/// Cleaned station records of one sheet, in sheet order.
///
/// Built once per sheet selection and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationCatalog {
    sheet: String,
    records: Vec<StationRecord>,
}

impl StationCatalog {
    /// Runs normalization and cleaning over a raw sheet.
    #[tracing::instrument(skip(raw), fields(rows = raw.len()))]
    pub fn from_raw(sheet: &str, raw: RawSheet) -> Self {
        let normalized = normalize_columns(raw);
        let catalog = Self::from_records(sheet, clean_sheet(&normalized));

        let duplicates = catalog.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(
                sheet,
                count = duplicates.len(),
                ids = ?duplicates,
                "Duplicate station ids, lookups use the first match"
            );
        }
        catalog
    }

    pub fn from_records(sheet: &str, records: Vec<StationRecord>) -> Self {
        Self {
            sheet: sheet.to_string(),
            records,
        }
    }

    /// Empty catalog used when a sheet cannot be loaded.
    pub fn empty(sheet: &str) -> Self {
        Self::from_records(sheet, Vec::new())
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn category(&self) -> Option<DeviceCategory> {
        DeviceCategory::from_sheet_name(&self.sheet)
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose `id_site` equals `id`.
    pub fn find(&self, id: &str) -> Option<&StationRecord> {
        self.records.iter().find(|r| r.id_site == id)
    }

    /// Number of distinct non-missing values of a field.
    pub fn distinct_count<K, F>(&self, field: F) -> usize
    where
        K: Eq + Hash,
        F: Fn(&StationRecord) -> Option<K>,
    {
        self.records
            .iter()
            .filter_map(field)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Smallest non-missing value of a field.
    pub fn min_of<T, F>(&self, field: F) -> Option<T>
    where
        T: PartialOrd,
        F: Fn(&StationRecord) -> Option<T>,
    {
        self.records.iter().filter_map(field).fold(None, |acc, v| match acc {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
    }

    /// Ids that occur more than once, each reported once.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.records
            .iter()
            .map(|r| r.id_site.as_str())
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .collect()
    }

    /// Picker entries for records that have a station name.
    pub fn site_options(&self) -> Vec<SiteOption> {
        self.records
            .iter()
            .filter_map(|r| {
                r.display_label().map(|display| SiteOption {
                    id_site: r.id_site.clone(),
                    display,
                })
            })
            .collect()
    }

    pub fn directory(&self) -> Vec<DirectoryRow> {
        self.records.iter().map(DirectoryRow::from).collect()
    }
}

/// Station id from a picker label such as `"96001 - Stasiun Sabang"`.
pub fn parse_selection(display: &str) -> &str {
    display
        .split_once(" - ")
        .map_or(display, |(id, _)| id)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_record;

    fn catalog() -> StationCatalog {
        let mut a = sample_record("S1");
        a.th_pengadaan = Some(2015);
        let mut b = sample_record("S2");
        b.provinsi = Some("Bali".to_string());
        b.th_pengadaan = None;
        let mut c = sample_record("S3");
        c.provinsi = None;
        c.nama_site = None;
        c.th_pengadaan = Some(2011);
        StationCatalog::from_records("AWS", vec![a, b, c])
    }

    #[test]
    fn test_find_first_match() {
        let mut dup = sample_record("S1");
        dup.nama_site = Some("second".to_string());
        let catalog = StationCatalog::from_records("AWS", vec![sample_record("S1"), dup]);
        assert_eq!(
            catalog.find("S1").and_then(|r| r.nama_site.as_deref()),
            Some("Stasiun S1")
        );
        assert!(catalog.find("nope").is_none());
        assert_eq!(catalog.duplicate_ids(), vec!["S1"]);
    }

    #[test]
    fn test_aggregates_ignore_missing() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.distinct_count(|r| r.provinsi.clone()), 2);
        assert_eq!(catalog.min_of(|r| r.th_pengadaan), Some(2011));
        assert_eq!(catalog.category(), Some(DeviceCategory::Aws));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = StationCatalog::empty("ARG");
        assert!(catalog.is_empty());
        assert_eq!(catalog.distinct_count(|r| r.provinsi.clone()), 0);
        assert_eq!(catalog.min_of(|r| r.th_pengadaan), None);
        assert!(catalog.site_options().is_empty());
    }

    #[test]
    fn test_site_options_skip_unnamed() {
        let options = catalog().site_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].display, "S1 - Stasiun S1");
        assert_eq!(parse_selection(&options[1].display), "S2");
    }

    #[test]
    fn test_parse_selection_without_separator() {
        assert_eq!(parse_selection("96001"), "96001");
        assert_eq!(parse_selection("A - B - C"), "A");
    }
}
