//! Workbook sources: where station sheets come from.
//!
//! A [`WorkbookSource`] lists its sheets and reads one sheet at a time as a
//! [`RawSheet`]. Sources are identified by a stable string used as part of
//! the catalog cache key.

mod csv_dir;
mod memory;
mod xlsx;

pub use csv_dir::CsvDirectory;
pub use memory::MemoryWorkbook;
pub use xlsx::XlsxWorkbook;

use std::path::Path;

use crate::error::LoadError;
use crate::table::RawSheet;

/// Abstraction over a spreadsheet holding one sheet per device category.
pub trait WorkbookSource {
    /// Stable identity of the source, e.g. its path or URL.
    fn identity(&self) -> &str;

    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Result<Vec<String>, LoadError>;

    /// Reads one sheet. Unknown names yield [`LoadError::SheetNotFound`].
    fn read_sheet(&self, sheet: &str) -> Result<RawSheet, LoadError>;
}

impl<S: WorkbookSource + ?Sized> WorkbookSource for Box<S> {
    fn identity(&self) -> &str {
        (**self).identity()
    }

    fn sheet_names(&self) -> Result<Vec<String>, LoadError> {
        (**self).sheet_names()
    }

    fn read_sheet(&self, sheet: &str) -> Result<RawSheet, LoadError> {
        (**self).read_sheet(sheet)
    }
}

/// Opens a local workbook file, or a directory of CSV sheets.
pub fn open_local(path: &Path) -> Result<Box<dyn WorkbookSource>, LoadError> {
    if !path.exists() {
        return Err(LoadError::SourceMissing {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        Ok(Box::new(CsvDirectory::open(path)?))
    } else {
        Ok(Box::new(XlsxWorkbook::open(path)?))
    }
}

pub(crate) fn sheet_not_found(sheet: &str, available: Vec<String>) -> LoadError {
    LoadError::SheetNotFound {
        sheet: sheet.to_string(),
        available,
    }
}
