//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod retention;
mod sql;
mod table;

pub use retention::{
    ARCHIVE_DIRECTORY_NAME, FileActionFailure, FileCandidate, RetentionAction, RetentionOutcome,
    RetentionRequest, THRESHOLD_DATE_FORMAT, ThresholdDate, parse_threshold_date,
};
pub use sql::{
    InsertStatementRenderer, derive_table_name, encode_cell, format_float, quote_identifier,
};
pub use table::{CellValue, Numeric, TableDocument};
