use crate::error::LoadError;
use crate::source::{WorkbookSource, sheet_not_found};
use crate::table::RawSheet;

/// Workbook held in memory, mostly useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    identity: String,
    sheets: Vec<(String, RawSheet)>,
}

impl MemoryWorkbook {
    pub fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, name: &str, sheet: RawSheet) -> Self {
        self.sheets.push((name.to_string(), sheet));
        self
    }
}

impl WorkbookSource for MemoryWorkbook {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn sheet_names(&self) -> Result<Vec<String>, LoadError> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_sheet(&self, sheet: &str) -> Result<RawSheet, LoadError> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| sheet_not_found(sheet, self.sheet_names().unwrap_or_default()))
    }
}
