//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod atomic_script_writer;
mod local_file_system;
mod spreadsheet_table_reader;

pub use atomic_script_writer::AtomicScriptWriter;
pub use local_file_system::LocalFileSystem;
pub use spreadsheet_table_reader::SpreadsheetTableReader;
