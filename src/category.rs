//! Device categories. Each workbook sheet holds one device type.

use serde::Serialize;
use std::fmt;

/// Icon, color and icon-font prefix of a map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub icon: &'static str,
    pub prefix: &'static str,
}

impl MarkerStyle {
    /// Style for sheets outside the known categories.
    pub const GENERIC: MarkerStyle = MarkerStyle {
        color: "gray",
        icon: "info-sign",
        prefix: "glyphicon",
    };

    /// Style of the currently selected station, regardless of category.
    pub const HIGHLIGHTED: MarkerStyle = MarkerStyle {
        color: "red",
        icon: "star",
        prefix: "glyphicon",
    };

    const fn font_awesome(color: &'static str, icon: &'static str) -> Self {
        MarkerStyle {
            color,
            icon,
            prefix: "fa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceCategory {
    Aws,
    Aaws,
    Arg,
    Ikro,
    Asrs,
}

impl DeviceCategory {
    /// All categories, in legend order.
    pub const ALL: [DeviceCategory; 5] = [
        DeviceCategory::Aws,
        DeviceCategory::Aaws,
        DeviceCategory::Arg,
        DeviceCategory::Ikro,
        DeviceCategory::Asrs,
    ];

    /// Category for a sheet name. Surrounding whitespace and letter case are ignored.
    pub fn from_sheet_name(sheet: &str) -> Option<Self> {
        let sheet = sheet.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(sheet))
    }

    pub fn code(self) -> &'static str {
        match self {
            DeviceCategory::Aws => "AWS",
            DeviceCategory::Aaws => "AAWS",
            DeviceCategory::Arg => "ARG",
            DeviceCategory::Ikro => "IKRO",
            DeviceCategory::Asrs => "ASRS",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            DeviceCategory::Aws => "Automatic Weather Station",
            DeviceCategory::Aaws => "Automatic Agroclimate Weather Station",
            DeviceCategory::Arg => "Automatic Rain Gauge",
            DeviceCategory::Ikro => "Iklim Mikro",
            DeviceCategory::Asrs => "Automatic Solar Radiation Station",
        }
    }

    pub fn marker_style(self) -> MarkerStyle {
        match self {
            DeviceCategory::Aws => MarkerStyle::font_awesome("blue", "cloud"),
            DeviceCategory::Aaws => MarkerStyle::font_awesome("green", "leaf"),
            DeviceCategory::Arg => MarkerStyle::font_awesome("cadetblue", "tint"),
            DeviceCategory::Ikro => MarkerStyle::font_awesome("orange", "thermometer-half"),
            DeviceCategory::Asrs => MarkerStyle::font_awesome("red", "sun"),
        }
    }

    /// File name of the illustrative image for this category.
    pub fn image_file(self) -> &'static str {
        match self {
            DeviceCategory::Aws => "aws.png",
            DeviceCategory::Aaws => "aaws.png",
            DeviceCategory::Arg => "arg.png",
            DeviceCategory::Ikro => "ikro.png",
            DeviceCategory::Asrs => "asrs.png",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Default marker style for a sheet: its category style, or the generic one.
pub fn default_style(category: Option<DeviceCategory>) -> MarkerStyle {
    category.map_or(MarkerStyle::GENERIC, DeviceCategory::marker_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sheet_name() {
        assert_eq!(DeviceCategory::from_sheet_name("AWS"), Some(DeviceCategory::Aws));
        assert_eq!(DeviceCategory::from_sheet_name(" aaws "), Some(DeviceCategory::Aaws));
        assert_eq!(DeviceCategory::from_sheet_name("Sheet1"), None);
    }

    #[test]
    fn test_codes_round_trip_through_sheet_names() {
        for category in DeviceCategory::ALL {
            assert_eq!(DeviceCategory::from_sheet_name(category.code()), Some(category));
        }
    }

    #[test]
    fn test_styles() {
        let aws = DeviceCategory::Aws.marker_style();
        assert_eq!((aws.color, aws.icon, aws.prefix), ("blue", "cloud", "fa"));
        assert_eq!(default_style(None), MarkerStyle::GENERIC);
        assert_eq!(default_style(Some(DeviceCategory::Arg)).color, "cadetblue");
        assert_ne!(MarkerStyle::HIGHLIGHTED, aws);
    }
}
