use std::path::Path;

use datasweep_core::{AppError, AppResult};
use datasweep_domain::{CellValue, TableDocument};

use super::assembly::{assemble_table, is_blank};

/// Field values read as missing data.
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "NULL", "null", "#N/A"];

pub(super) fn read_csv(source: &Path) -> AppResult<TableDocument> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(source)
        .map_err(|error| {
            AppError::SourceRead(format!("failed to open '{}': {error}", source.display()))
        })?;

    let mut header: Option<Vec<Option<String>>> = None;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|error| {
            AppError::SourceRead(format!("failed to parse '{}': {error}", source.display()))
        })?;

        if header.is_none() {
            if record.iter().all(str::is_empty) {
                continue;
            }
            header = Some(
                record
                    .iter()
                    .map(|field| Some(field.to_owned()).filter(|name| !name.is_empty()))
                    .collect(),
            );
            continue;
        }

        let row: Vec<CellValue> = record.iter().map(classify_field).collect();
        if !is_blank(&row) {
            rows.push(row);
        }
    }

    assemble_table(header.unwrap_or_default(), rows)
}

/// Classifies one CSV field on its own, without looking at its column.
fn classify_field(field: &str) -> CellValue {
    if field.is_empty() || MISSING_MARKERS.contains(&field) {
        return CellValue::Null;
    }

    let trimmed = field.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return CellValue::integer(value);
    }
    if let Ok(value) = trimmed.parse::<f64>()
        && value.is_finite()
    {
        return CellValue::float(value);
    }

    CellValue::text(field)
}
