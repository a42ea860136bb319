use std::path::{Path, PathBuf};

use crate::category::DeviceCategory;

pub const DEFAULT_WORKBOOK: &str = "METADATA_SELURUH_DATA.xlsx";

/// Runtime settings shared by the CLI subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Workbook file, CSV sheet directory, or `http(s)://` URL.
    pub workbook: String,
    /// Directory holding the per-category illustrative images.
    pub asset_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workbook: DEFAULT_WORKBOOK.to_string(),
            asset_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    pub fn is_remote(&self) -> bool {
        self.workbook.starts_with("http://") || self.workbook.starts_with("https://")
    }

    pub fn workbook_path(&self) -> &Path {
        Path::new(&self.workbook)
    }

    /// Path of the illustrative image for a category.
    pub fn asset_path(&self, category: DeviceCategory) -> PathBuf {
        self.asset_dir.join(category.image_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.workbook, "METADATA_SELURUH_DATA.xlsx");
        assert!(!settings.is_remote());
        assert_eq!(
            settings.asset_path(DeviceCategory::Ikro),
            PathBuf::from("./ikro.png")
        );
    }

    #[test]
    fn test_remote_detection() {
        let settings = Settings {
            workbook: "https://example.org/metadata.xlsx".to_string(),
            ..Default::default()
        };
        assert!(settings.is_remote());
    }
}
