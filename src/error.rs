//! Error taxonomy for loading station workbooks.
//!
//! Only failures that stop a load are errors. Rows with unusable coordinates
//! are dropped silently by the cleaner, and a missing illustrative image is a
//! warning [`Notice`](crate::dashboard::Notice), not an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Workbook not found at {path}")]
    SourceMissing { path: PathBuf },
    #[error("Failed to read workbook '{source_id}': {reason}")]
    SourceUnreadable { source_id: String, reason: String },
    #[error("Sheet '{sheet}' not found (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },
    #[error("Failed to load sheet '{sheet}': {reason}")]
    SheetUnreadable { sheet: String, reason: String },
}

impl LoadError {
    /// Whether the error is about the whole source rather than a single sheet.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            LoadError::SourceMissing { .. } | LoadError::SourceUnreadable { .. }
        )
    }

    pub(crate) fn unreadable(source_id: &str, reason: impl ToString) -> Self {
        LoadError::SourceUnreadable {
            source_id: source_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn sheet_unreadable(sheet: &str, reason: impl ToString) -> Self {
        LoadError::SheetUnreadable {
            sheet: sheet.to_string(),
            reason: reason.to_string(),
        }
    }
}
