use datasweep_core::{AppError, AppResult};

use crate::export_ports::SqlImportRequest;

/// Placeholder for the SQL-to-table direction.
///
/// Reconstructing a table requires parsing a specific SQL dialect, which is
/// not supported. Every call fails with `AppError::Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlImportService;

impl SqlImportService {
    /// Creates the import service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Always fails: SQL scripts cannot be converted back into tables.
    pub fn import(&self, request: &SqlImportRequest) -> AppResult<()> {
        Err(AppError::Unsupported(format!(
            "cannot convert '{}' into '{}': SQL parsing requires a specific database dialect",
            request.script_path.display(),
            request.destination_path.display()
        )))
    }
}
