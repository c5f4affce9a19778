use std::collections::HashMap;

use datasweep_core::{AppError, AppResult};
use datasweep_domain::{CellValue, TableDocument};

/// Builds a table from a raw header and classified rows.
///
/// Missing header names become `Unnamed: <index>` and repeated names get a
/// `.<n>` suffix. Every row is padded with nulls to the widest row.
pub(super) fn assemble_table(
    header: Vec<Option<String>>,
    rows: Vec<Vec<CellValue>>,
) -> AppResult<TableDocument> {
    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or_default();

    let columns = column_names(header, width);
    let rows = rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, CellValue::Null);
            row
        })
        .collect();

    TableDocument::new(columns, rows)
        .map_err(|error| AppError::SourceRead(format!("malformed table: {}", error.message())))
}

/// Returns true when every cell of `row` is null.
pub(super) fn is_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_null)
}

fn column_names(header: Vec<Option<String>>, width: usize) -> Vec<String> {
    let mut header = header.into_iter();
    let mut occurrences: HashMap<String, usize> = HashMap::new();

    (0..width)
        .map(|index| {
            let base = header
                .next()
                .flatten()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("Unnamed: {index}"));

            let seen = occurrences.entry(base.clone()).or_default();
            let name = if *seen == 0 {
                base
            } else {
                format!("{base}.{seen}")
            };
            *seen += 1;
            name
        })
        .collect()
}
