use std::cell::RefCell;
use std::path::Path;

use calamine::Reader;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::parser::{WorkbookSheets, parse_workbook, range_to_sheet};
use crate::source::{WorkbookSource, sheet_not_found};
use crate::table::RawSheet;

/// Spreadsheet file (xlsx, xls, xlsb or ods) parsed with calamine.
pub struct XlsxWorkbook {
    identity: String,
    sheet_names: Vec<String>,
    // calamine needs `&mut` to read a range
    sheets: RefCell<WorkbookSheets>,
}

impl XlsxWorkbook {
    /// Reads and parses the workbook at `path`.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let identity = path.display().to_string();
        if !path.exists() {
            return Err(LoadError::SourceMissing {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path).map_err(|e| LoadError::unreadable(&identity, e))?;
        Self::from_bytes(&identity, bytes)
    }

    /// Parses workbook bytes obtained elsewhere, e.g. downloaded.
    #[tracing::instrument(skip(bytes), fields(bytes = bytes.len()))]
    pub fn from_bytes(identity: &str, bytes: Vec<u8>) -> Result<Self, LoadError> {
        let sheets = parse_workbook(bytes).map_err(|e| LoadError::unreadable(identity, e))?;
        let sheet_names = sheets.sheet_names();
        info!(sheets = sheet_names.len(), "Workbook opened");

        Ok(Self {
            identity: identity.to_string(),
            sheet_names,
            sheets: RefCell::new(sheets),
        })
    }
}

impl WorkbookSource for XlsxWorkbook {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn sheet_names(&self) -> Result<Vec<String>, LoadError> {
        Ok(self.sheet_names.clone())
    }

    fn read_sheet(&self, sheet: &str) -> Result<RawSheet, LoadError> {
        if !self.sheet_names.iter().any(|s| s == sheet) {
            return Err(sheet_not_found(sheet, self.sheet_names.clone()));
        }

        let range = self
            .sheets
            .borrow_mut()
            .worksheet_range(sheet)
            .map_err(|e| LoadError::sheet_unreadable(sheet, e))?;

        let raw = range_to_sheet(&range);
        debug!(sheet, rows = raw.len(), columns = raw.headers.len(), "Sheet read");
        Ok(raw)
    }
}
