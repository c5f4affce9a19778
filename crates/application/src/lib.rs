//! Application services and ports.

#![forbid(unsafe_code)]

mod export_ports;
mod retention_ports;
mod retention_service;
mod sql_export_service;
mod sql_import_service;

pub use export_ports::{
    ScriptWriter, SqlExportOutcome, SqlExportRequest, SqlImportRequest, TableReader,
};
pub use retention_ports::{DirectoryLister, FileActionExecutor};
pub use retention_service::RetentionService;
pub use sql_export_service::SqlExportService;
pub use sql_import_service::SqlImportService;
