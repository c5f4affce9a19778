use std::iter;
use std::path::Path;

use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, Timelike};
use datasweep_core::{AppError, AppResult};
use datasweep_domain::{CellValue, Numeric, TableDocument, format_float};

use super::assembly::{assemble_table, is_blank};

/// Largest magnitude below which an integral float is read as an integer.
const INTEGRAL_FLOAT_LIMIT: f64 = 9_007_199_254_740_992.0;

pub(super) fn read_workbook(source: &Path) -> AppResult<TableDocument> {
    let mut workbook = open_workbook_auto(source).map_err(|error| {
        AppError::SourceRead(format!(
            "failed to open workbook '{}': {error}",
            source.display()
        ))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            AppError::SourceRead(format!("workbook '{}' has no worksheets", source.display()))
        })?
        .map_err(|error| {
            AppError::SourceRead(format!(
                "failed to read the first worksheet of '{}': {error}",
                source.display()
            ))
        })?;

    // Ranges start at the first used cell; empty leading columns stay columns.
    let leading_columns = range
        .start()
        .and_then(|(_, column)| usize::try_from(column).ok())
        .unwrap_or_default();

    let mut rows = range
        .rows()
        .map(|row| {
            iter::repeat_n(CellValue::Null, leading_columns)
                .chain(row.iter().map(classify_cell))
                .collect::<Vec<_>>()
        })
        .filter(|row| !is_blank(row));

    let header = rows
        .next()
        .map(|row| row.iter().map(header_name).collect())
        .unwrap_or_default();

    assemble_table(header, rows.collect())
}

/// Classifies one workbook cell.
///
/// Workbooks store every number as a float; integral values that fit an
/// `f64` mantissa are treated as integers, the way spreadsheet tools show them.
fn classify_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(value) => CellValue::integer(*value),
        Data::Float(value) => classify_float(*value),
        Data::Bool(value) => CellValue::integer(i64::from(*value)),
        Data::String(value) => CellValue::text(value.as_str()),
        Data::DateTime(value) => classify_date_time(value),
        Data::DateTimeIso(value) => CellValue::text(value.replacen('T', " ", 1)),
        Data::DurationIso(value) => CellValue::text(value.as_str()),
    }
}

fn classify_float(value: f64) -> CellValue {
    if value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT {
        #[allow(clippy::cast_possible_truncation)]
        return CellValue::integer(value as i64);
    }

    CellValue::float(value)
}

fn classify_date_time(value: &ExcelDateTime) -> CellValue {
    if value.is_duration() {
        return value.as_duration().map_or_else(
            || CellValue::float(value.as_f64()),
            |duration| CellValue::text(format_duration(duration.num_seconds())),
        );
    }

    value.as_datetime().map_or_else(
        || CellValue::float(value.as_f64()),
        |date_time| CellValue::text(format_date_time(date_time)),
    )
}

fn format_date_time(value: NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

fn format_duration(total_seconds: i64) -> String {
    let days = total_seconds.div_euclid(86_400);
    let remainder = total_seconds.rem_euclid(86_400);

    format!(
        "{days} days {:02}:{:02}:{:02}",
        remainder / 3_600,
        remainder % 3_600 / 60,
        remainder % 60
    )
}

fn header_name(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Null => None,
        CellValue::Numeric(Numeric::Integer(value)) => Some(value.to_string()),
        CellValue::Numeric(Numeric::Float(value)) => Some(format_float(*value)),
        CellValue::Text(value) => Some(value.clone()),
    }
}
