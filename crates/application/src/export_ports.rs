use std::path::{Path, PathBuf};

use datasweep_core::AppResult;
use datasweep_domain::TableDocument;
use serde::Serialize;

/// Port for loading a spreadsheet source.
pub trait TableReader: Send + Sync {
    /// Loads the whole table, classifying every cell.
    ///
    /// Fails with `AppError::SourceRead` when the source cannot be opened or
    /// decoded.
    fn read_table(&self, source: &Path) -> AppResult<TableDocument>;
}

/// Port for persisting a generated SQL script.
pub trait ScriptWriter: Send + Sync {
    /// Writes every statement to `destination` and returns how many were written.
    ///
    /// The destination is either fully written or left untouched; failures
    /// surface as `AppError::DestinationWrite`.
    fn write_script(
        &self,
        destination: &Path,
        statements: &mut dyn Iterator<Item = String>,
    ) -> AppResult<usize>;

    /// Returns true when writing `destination` would replace the existing file
    /// at `existing`, however either path is spelled.
    fn would_replace(&self, destination: &Path, existing: &Path) -> bool;
}

/// Input payload for a table-to-SQL conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlExportRequest {
    /// Spreadsheet to read.
    pub source_path: PathBuf,
    /// Script file to produce.
    pub destination_path: PathBuf,
}

/// Result of a completed table-to-SQL conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlExportOutcome {
    /// Table name used in every statement.
    pub table_name: String,
    /// Number of `INSERT` statements written.
    pub statement_count: usize,
    /// Script file that was produced.
    pub destination_path: PathBuf,
}

/// Input payload for the SQL-to-table direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlImportRequest {
    /// SQL script to read.
    pub script_path: PathBuf,
    /// Spreadsheet to produce.
    pub destination_path: PathBuf,
}
