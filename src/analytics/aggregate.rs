use tracing::debug;

use crate::analytics::types::{RegionCount, Summary, VendorShare, YearCount};
use crate::analytics::utility::{count_in_order, pct};
use crate::catalog::StationCatalog;

/// Vendors shown in the proportion chart.
pub const VENDOR_LIMIT: usize = 15;

/// Stations per province, smallest count first. Records without a province
/// are left out; ties keep first-seen order.
pub fn region_distribution(catalog: &StationCatalog) -> Vec<RegionCount> {
    let mut counts = count_in_order(catalog.iter().filter_map(|r| r.provinsi.clone()));
    counts.sort_by_key(|(_, count)| *count);

    counts
        .into_iter()
        .map(|(provinsi, count)| RegionCount { provinsi, count })
        .collect()
}

/// Stations per installation year, oldest year first. Records without a
/// year are left out.
pub fn installation_timeline(catalog: &StationCatalog) -> Vec<YearCount> {
    let mut counts = count_in_order(catalog.iter().filter_map(|r| r.th_pengadaan));
    counts.sort_by_key(|(year, _)| *year);

    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// The [`VENDOR_LIMIT`] most common vendors, most common first, with their
/// share of the listed total. The `N/A` placeholder is excluded; ties keep
/// first-seen order.
pub fn vendor_distribution(catalog: &StationCatalog) -> Vec<VendorShare> {
    let mut counts = count_in_order(
        catalog
            .iter()
            .filter(|r| r.has_known_vendor())
            .map(|r| r.merk.clone()),
    );
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(VENDOR_LIMIT);

    let total: usize = counts.iter().map(|(_, count)| count).sum();

    counts
        .into_iter()
        .map(|(merk, count)| VendorShare {
            merk,
            count,
            percent: pct(count, total),
        })
        .collect()
}

/// Computes every summary for the catalog.
pub fn summarize(catalog: &StationCatalog) -> Summary {
    let summary = Summary {
        regions: region_distribution(catalog),
        timeline: installation_timeline(catalog),
        vendors: vendor_distribution(catalog),
    };

    debug!(
        sheet = catalog.sheet(),
        regions = summary.regions.len(),
        years = summary.timeline.len(),
        vendors = summary.vendors.len(),
        "Summary computed"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_record;
    use approx::assert_relative_eq;

    fn with_vendors(vendors: &[&str]) -> StationCatalog {
        let records = vendors
            .iter()
            .enumerate()
            .map(|(i, merk)| {
                let mut r = sample_record(&i.to_string());
                r.merk = merk.to_string();
                r
            })
            .collect();
        StationCatalog::from_records("AWS", records)
    }

    #[test]
    fn test_vendor_distribution_excludes_placeholder() {
        let catalog = with_vendors(&["A", "A", "B", "N/A", "N/A"]);
        let vendors = vendor_distribution(&catalog);
        let counts: Vec<_> = vendors.iter().map(|v| (v.merk.as_str(), v.count)).collect();
        assert_eq!(counts, vec![("A", 2), ("B", 1)]);
        assert_relative_eq!(vendors[0].percent, 200.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vendor_distribution_top_fifteen_with_stable_ties() {
        let names: Vec<String> = (0..20).map(|i| format!("V{i:02}")).collect();
        let mut vendors: Vec<&str> = names.iter().map(String::as_str).collect();
        vendors.push("V19");
        let result = vendor_distribution(&with_vendors(&vendors));
        assert_eq!(result.len(), VENDOR_LIMIT);
        assert_eq!(result[0].merk, "V19");
        assert_eq!(result[1].merk, "V00");
        assert_eq!(result[14].merk, "V13");
        let total: f64 = result.iter().map(|v| v.percent).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_region_distribution_ascending_with_stable_ties() {
        let mut records = Vec::new();
        for (id, prov) in [
            ("1", Some("Papua")),
            ("2", Some("Aceh")),
            ("3", Some("Bali")),
            ("4", Some("Aceh")),
            ("5", None),
        ] {
            let mut r = sample_record(id);
            r.provinsi = prov.map(str::to_string);
            records.push(r);
        }
        let regions = region_distribution(&StationCatalog::from_records("ARG", records));
        assert_eq!(
            regions,
            vec![
                RegionCount { provinsi: "Papua".into(), count: 1 },
                RegionCount { provinsi: "Bali".into(), count: 1 },
                RegionCount { provinsi: "Aceh".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_timeline_sorted_by_year() {
        let mut records = Vec::new();
        for (id, year) in [("1", Some(2020)), ("2", Some(2012)), ("3", None), ("4", Some(2020))] {
            let mut r = sample_record(id);
            r.th_pengadaan = year;
            records.push(r);
        }
        let timeline = installation_timeline(&StationCatalog::from_records("AWS", records));
        assert_eq!(
            timeline,
            vec![
                YearCount { year: 2012, count: 1 },
                YearCount { year: 2020, count: 2 },
            ]
        );
    }

    #[test]
    fn test_empty_catalog_yields_empty_summary() {
        let summary = summarize(&StationCatalog::empty("AWS"));
        assert!(summary.is_empty());
    }
}
