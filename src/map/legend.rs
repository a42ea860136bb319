use serde::Serialize;

use crate::category::{DeviceCategory, MarkerStyle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub style: MarkerStyle,
    pub label: String,
    /// Category code, `None` for the selected-station entry.
    pub code: Option<&'static str>,
}

/// Legend for a workbook: the selected-station marker first, then one entry
/// per known category that has a sheet in the workbook.
pub fn legend<S: AsRef<str>>(sheet_names: &[S]) -> Vec<LegendEntry> {
    let present: Vec<DeviceCategory> = sheet_names
        .iter()
        .filter_map(|s| DeviceCategory::from_sheet_name(s.as_ref()))
        .collect();

    let selected = LegendEntry {
        style: MarkerStyle::HIGHLIGHTED,
        label: "Stasiun yang sedang dipilih".to_string(),
        code: None,
    };

    std::iter::once(selected)
        .chain(
            DeviceCategory::ALL
                .into_iter()
                .filter(|c| present.contains(c))
                .map(|c| LegendEntry {
                    style: c.marker_style(),
                    label: c.full_name().to_string(),
                    code: Some(c.code()),
                }),
        )
        .collect()
}
