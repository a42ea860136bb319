use approx::assert_relative_eq;
use station_dashboard::catalog::parse_selection;
use station_dashboard::category::{DeviceCategory, MarkerStyle};
use station_dashboard::config::Settings;
use station_dashboard::dashboard::{Dashboard, NoticeLevel};
use station_dashboard::map::{MAP_CENTER, ZOOM_EMPTY, ZOOM_WITH_STATIONS};
use station_dashboard::output::write_view;
use station_dashboard::source::{self, CsvDirectory, WorkbookSource, XlsxWorkbook};
use std::env;
use std::fs;

const FIXTURE: &[u8] = include_bytes!("fixtures/stations.xlsx");

fn settings() -> Settings {
    Settings {
        asset_dir: env::temp_dir().join("station_dashboard_it_assets"),
        ..Default::default()
    }
}

fn fixture_dashboard() -> Dashboard<XlsxWorkbook> {
    let workbook =
        XlsxWorkbook::from_bytes("fixtures/stations.xlsx", FIXTURE.to_vec()).expect("Failed to parse fixture");
    Dashboard::open(workbook, settings()).expect("Failed to open dashboard")
}

#[test]
fn test_fixture_sheets_are_discovered_in_order() {
    let dash = fixture_dashboard();
    assert_eq!(dash.sheet_names(), ["AWS", "ARG", "Catatan"]);
}

#[test]
fn test_full_pipeline_legacy_columns() {
    let mut dash = fixture_dashboard();
    let view = dash.view("AWS", Some("96009"));

    assert!(!view.has_errors());
    assert_eq!(view.category, Some(DeviceCategory::Aws));

    // the "kosong" latitude row is dropped, the unparseable date row is kept
    assert_eq!(view.catalog.len(), 4);
    assert!(view.catalog.find("96073").is_none());
    let undated = view.catalog.find("96015").expect("undated station kept");
    assert_eq!(undated.th_pengadaan, None);
    assert_eq!(undated.merk, "N/A");

    let first = view.catalog.find("96001").expect("numeric id rendered as text");
    assert_eq!(first.nama_site.as_deref(), Some("Stasiun Meteorologi Maimun Saleh"));
    assert_eq!(first.kabupaten.as_deref(), Some("Sabang"));
    assert_eq!(first.elevasi, Some(126.0));
    assert_eq!(first.th_pengadaan, Some(2015));
    assert_eq!(first.extra.get("keterangan").map(String::as_str), Some("aktif"));

    assert_eq!(view.stats.total_stations, 4);
    assert_eq!(view.stats.provinces, 2);
    assert_eq!(view.stats.active_since, Some(2012));
}

#[test]
fn test_map_highlights_only_selected_station() {
    let mut dash = fixture_dashboard();
    let view = dash.view("AWS", Some("96009"));

    assert_eq!(view.map.center, MAP_CENTER);
    assert_relative_eq!(view.map.zoom, ZOOM_WITH_STATIONS);
    assert_eq!(view.map.markers.len(), 4);

    let selected: Vec<_> = view.map.markers.iter().filter(|m| m.selected).collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id_site, "96009");
    assert_eq!(selected[0].style, MarkerStyle::HIGHLIGHTED);

    let aws_style = DeviceCategory::Aws.marker_style();
    assert!(view
        .map
        .markers
        .iter()
        .filter(|m| !m.selected)
        .all(|m| m.style == aws_style));
}

#[test]
fn test_summary_of_fixture_sheet() {
    let mut dash = fixture_dashboard();
    let view = dash.view("AWS", None);
    let summary = &view.summary;

    let regions: Vec<_> = summary
        .regions
        .iter()
        .map(|r| (r.provinsi.as_str(), r.count))
        .collect();
    assert_eq!(regions, vec![("Sumatera Barat", 1), ("Aceh", 3)]);

    let years: Vec<_> = summary.timeline.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2012, 2015, 2019]);

    assert_eq!(summary.vendors.len(), 2);
    assert_eq!(summary.vendors[0].merk, "Vaisala");
    assert_eq!(summary.vendors[0].count, 2);
    assert_relative_eq!(summary.vendors[0].percent, 200.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(
        summary.vendors.iter().map(|v| v.percent).sum::<f64>(),
        100.0,
        epsilon = 1e-9
    );
    assert!(summary.vendors.iter().all(|v| v.merk != "N/A"));
}

#[test]
fn test_canonical_sheet_and_selection_label() {
    let mut dash = fixture_dashboard();
    let catalog = dash.catalog("ARG").unwrap();

    let options = catalog.site_options();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].display, "150001 - ARG Cibinong");
    assert_eq!(parse_selection(&options[0].display), "150001");

    let dramaga = catalog.find("150002").unwrap();
    assert_eq!(dramaga.merk, "N/A");
    assert_eq!(dramaga.elevasi, Some(190.0));
    assert_eq!(catalog.find("150001").unwrap().elevasi, None);
}

#[test]
fn test_sheet_without_stations_renders_empty_view() {
    let mut dash = fixture_dashboard();
    let view = dash.view("Catatan", None);

    assert!(!view.has_errors());
    assert!(view.catalog.is_empty());
    assert!(view.map.markers.is_empty());
    assert_relative_eq!(view.map.zoom, ZOOM_EMPTY);
    assert!(view.summary.is_empty());
    assert_eq!(view.stats.active_since_label(), "N/A");
    assert!(view
        .notices
        .iter()
        .any(|n| n.level == NoticeLevel::Warning));
}

#[test]
fn test_corrupt_workbook_is_a_source_error() {
    let err = match XlsxWorkbook::from_bytes("broken.xlsx", b"not a workbook".to_vec()) {
        Ok(_) => panic!("garbage bytes must not parse"),
        Err(e) => e,
    };
    assert!(err.is_source_error());
}

#[test]
fn test_missing_local_workbook() {
    let path = env::temp_dir().join("station_dashboard_it_missing.xlsx");
    let _ = fs::remove_file(&path);
    let err = match source::open_local(&path) {
        Ok(_) => panic!("missing file must not open"),
        Err(e) => e,
    };
    assert!(err.is_source_error());
}

#[test]
fn test_csv_directory_pipeline() {
    let dir = env::temp_dir().join("station_dashboard_it_csv");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("IKRO.csv"),
        "id_station,name_station,nama_propinsi,latt_station,long_station,th_pengadaan,nama_vendor\n\
         70001,Ikro Palu,Sulawesi Tengah,-0.9,119.87,2018-09-28,Sutron\n\
         70002,Ikro Donggala,Sulawesi Tengah,,119.7,2018-10-01,Sutron\n",
    )
    .unwrap();

    let source = source::open_local(&dir).unwrap();
    assert_eq!(source.sheet_names().unwrap(), vec!["IKRO".to_string()]);

    let mut dash = Dashboard::open(source, settings()).unwrap();
    let view = dash.view("IKRO", Some("70001 - Ikro Palu"));

    // a full label is not an id
    assert!(view.selected.is_none());

    let view = dash.view("IKRO", Some(parse_selection("70001 - Ikro Palu")));
    assert_eq!(view.catalog.len(), 1);
    assert_eq!(view.selected.as_ref().unwrap().th_pengadaan, Some(2018));
    assert_eq!(view.category, Some(DeviceCategory::Ikro));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_csv_directory_opens_directly() {
    let dir = env::temp_dir().join("station_dashboard_it_csv_direct");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("ASRS.csv"), "id_site,latitude,longitude\nA1,-7.0,110.4\n").unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let source = CsvDirectory::open(&dir).unwrap();
    assert_eq!(source.sheet_names().unwrap(), vec!["ASRS".to_string()]);
    assert_eq!(source.read_sheet("ASRS").unwrap().len(), 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_render_writes_all_files() {
    let out_dir = env::temp_dir().join("station_dashboard_it_render");
    let _ = fs::remove_dir_all(&out_dir);

    let mut dash = fixture_dashboard();
    let view = dash.view("AWS", Some("96001"));
    let written = write_view(&out_dir, &view).unwrap();

    let names: Vec<_> = written
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(
        names,
        vec!["map.html", "map.json", "summary.json", "directory.csv", "detail.json"]
    );

    let page = fs::read_to_string(out_dir.join("map.html")).unwrap();
    assert!(page.contains("Stasiun yang sedang dipilih"));
    assert!(!page.contains("__MAP_STATE__"));

    let directory = fs::read_to_string(out_dir.join("directory.csv")).unwrap();
    assert_eq!(directory.lines().count(), 5);

    fs::remove_dir_all(&out_dir).unwrap();
}

#[test]
fn test_memory_workbook_vendor_summary_and_styling() {
    use station_dashboard::source::MemoryWorkbook;
    use station_dashboard::table::{CellValue, RawSheet};

    let rows = [("S1", "A"), ("S2", "A"), ("S3", "B"), ("S4", ""), ("S5", "N/A")]
        .into_iter()
        .map(|(id, merk)| {
            vec![
                CellValue::Text(id.to_string()),
                CellValue::Number(-6.2),
                CellValue::Number(106.8),
                CellValue::from_text(merk),
            ]
        })
        .collect();
    let sheet = RawSheet::new(
        vec!["id_site".into(), "latitude".into(), "longitude".into(), "merk".into()],
        rows,
    );

    let workbook = MemoryWorkbook::new("memory").with_sheet("AWS", sheet);
    let mut dash = Dashboard::open(workbook, settings()).unwrap();
    let view = dash.view("AWS", Some("S2"));

    let vendors: Vec<_> = view
        .summary
        .vendors
        .iter()
        .map(|v| (v.merk.as_str(), v.count))
        .collect();
    assert_eq!(vendors, vec![("A", 2), ("B", 1)]);

    let highlighted: Vec<_> = view
        .map
        .markers
        .iter()
        .filter(|m| m.style == MarkerStyle::HIGHLIGHTED)
        .map(|m| m.id_site.as_str())
        .collect();
    assert_eq!(highlighted, vec!["S2"]);

    // unnamed stations are not selectable
    assert!(view.site_options.is_empty());
}
