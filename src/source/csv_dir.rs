use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::LoadError;
use crate::source::{WorkbookSource, sheet_not_found};
use crate::table::{CellValue, RawSheet};

/// Directory of `<SHEET>.csv` files, one per sheet, each with a header row.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    identity: String,
    dir: PathBuf,
}

impl CsvDirectory {
    pub fn open(dir: &Path) -> Result<Self, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::SourceMissing {
                path: dir.to_path_buf(),
            });
        }
        Ok(Self {
            identity: dir.display().to_string(),
            dir: dir.to_path_buf(),
        })
    }

    fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{sheet}.csv"))
    }
}

impl WorkbookSource for CsvDirectory {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn sheet_names(&self) -> Result<Vec<String>, LoadError> {
        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| LoadError::unreadable(&self.identity, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| LoadError::unreadable(&self.identity, e))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_sheet(&self, sheet: &str) -> Result<RawSheet, LoadError> {
        let path = self.sheet_path(sheet);
        if !path.is_file() {
            return Err(sheet_not_found(sheet, self.sheet_names()?));
        }

        let file = File::open(&path).map_err(|e| LoadError::sheet_unreadable(sheet, e))?;
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = rdr
            .headers()
            .map_err(|e| LoadError::sheet_unreadable(sheet, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| LoadError::sheet_unreadable(sheet, e))?;
            rows.push(record.iter().map(CellValue::from_text).collect());
        }

        debug!(sheet, rows = rows.len(), "CSV sheet read");
        Ok(RawSheet::new(headers, rows))
    }
}
