use std::sync::Arc;

use datasweep_core::{AppError, AppResult};
use datasweep_domain::{InsertStatementRenderer, derive_table_name};

use crate::export_ports::{ScriptWriter, SqlExportOutcome, SqlExportRequest, TableReader};

/// Application service converting a spreadsheet into an `INSERT` script.
#[derive(Clone)]
pub struct SqlExportService {
    reader: Arc<dyn TableReader>,
    writer: Arc<dyn ScriptWriter>,
}

impl SqlExportService {
    /// Creates a SQL export service.
    #[must_use]
    pub fn new(reader: Arc<dyn TableReader>, writer: Arc<dyn ScriptWriter>) -> Self {
        Self { reader, writer }
    }

    /// Reads the source table and writes one statement per row.
    ///
    /// The source is fully loaded before the destination is opened, so a
    /// read failure never touches the destination.
    pub fn export(&self, request: &SqlExportRequest) -> AppResult<SqlExportOutcome> {
        if request.source_path == request.destination_path
            || self
                .writer
                .would_replace(&request.destination_path, &request.source_path)
        {
            return Err(AppError::Validation(format!(
                "destination '{}' would overwrite the source spreadsheet",
                request.destination_path.display()
            )));
        }

        let table = self.reader.read_table(request.source_path.as_path())?;
        let renderer =
            InsertStatementRenderer::new(derive_table_name(&request.source_path), table.columns());
        let mut statements = renderer.render_table(&table);
        let statement_count = self
            .writer
            .write_script(request.destination_path.as_path(), &mut statements)?;

        Ok(SqlExportOutcome {
            table_name: renderer.table_name().to_owned(),
            statement_count,
            destination_path: request.destination_path.clone(),
        })
    }
}
