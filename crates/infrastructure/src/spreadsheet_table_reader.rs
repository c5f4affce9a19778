//! Spreadsheet adapter producing classified tables.
//!
//! Workbooks are read from their first worksheet with calamine; `.csv`
//! files with the csv crate. The first non-blank row is the header and
//! fully blank rows are skipped.

use std::path::Path;

use datasweep_application::TableReader;
use datasweep_core::{AppError, AppResult};
use datasweep_domain::TableDocument;
use tracing::info;

mod assembly;
mod delimited;
mod workbook;

/// Source formats understood by [`SpreadsheetTableReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    fn detect(source: &Path) -> AppResult<Self> {
        let extension = source
            .extension()
            .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            other => Err(AppError::SourceRead(format!(
                "'{}' has unsupported extension '{other}'",
                source.display()
            ))),
        }
    }
}

/// Table reader dispatching on the source file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetTableReader;

impl SpreadsheetTableReader {
    /// Creates a spreadsheet reader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TableReader for SpreadsheetTableReader {
    fn read_table(&self, source: &Path) -> AppResult<TableDocument> {
        let table = match SourceFormat::detect(source)? {
            SourceFormat::Workbook => workbook::read_workbook(source)?,
            SourceFormat::Csv => delimited::read_csv(source)?,
        };

        info!(
            source = %source.display(),
            columns = table.columns().len(),
            rows = table.row_count(),
            "loaded source table"
        );
        Ok(table)
    }
}
