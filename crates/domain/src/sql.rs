//! SQL literal encoding and `INSERT` statement rendering.
//!
//! Output targets MySQL-style backtick identifiers. Table and column names
//! are emitted verbatim inside backticks; names that themselves contain a
//! backtick produce an invalid script.

use std::path::Path;

use crate::table::{CellValue, Numeric, TableDocument};

/// Derives the target table name from a source file path.
///
/// The extension after the last `.` of the file name is removed and spaces
/// become underscores. No other characters are touched.
#[must_use]
pub fn derive_table_name(source_path: &Path) -> String {
    let base_name = source_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = base_name
        .rsplit_once('.')
        .map_or(base_name.as_str(), |(stem, _)| stem);

    stem.replace(' ', "_")
}

/// Encodes one cell as a SQL literal.
#[must_use]
pub fn encode_cell(value: &CellValue) -> String {
    match value {
        CellValue::Null => "NULL".to_owned(),
        CellValue::Numeric(Numeric::Float(number)) if number.is_nan() => "NULL".to_owned(),
        CellValue::Numeric(Numeric::Integer(number)) => number.to_string(),
        CellValue::Numeric(Numeric::Float(number)) => format_float(*number),
        CellValue::Text(text) => format!("'{}'", text.replace('\'', "''")),
    }
}

/// Formats a float in shortest round-trip form.
///
/// Integral values keep a `.0` suffix. Magnitudes below `1e-4` or at least
/// `1e16` use exponent form with a signed, two-digit minimum exponent.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_owned();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent = exponent.parse::<i32>().unwrap_or_default();

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

/// Wraps an identifier in backticks.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("`{name}`")
}

/// Renders one `INSERT` statement per table row.
///
/// The quoted column list is computed once and shared by every statement.
#[derive(Debug, Clone)]
pub struct InsertStatementRenderer {
    table_name: String,
    column_list: String,
}

impl InsertStatementRenderer {
    /// Creates a renderer for `table_name` with the given columns.
    #[must_use]
    pub fn new<S: AsRef<str>>(table_name: impl Into<String>, columns: &[S]) -> Self {
        let column_list = columns
            .iter()
            .map(|column| quote_identifier(column.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            table_name: table_name.into(),
            column_list,
        }
    }

    /// Returns the target table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    /// Renders one statement, newline included.
    #[must_use]
    pub fn render_row(&self, row: &[CellValue]) -> String {
        let values = row.iter().map(encode_cell).collect::<Vec<_>>().join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({values});\n",
            quote_identifier(self.table_name.as_str()),
            self.column_list
        )
    }

    /// Renders every row of `table` lazily, in source order.
    pub fn render_table<'a>(
        &'a self,
        table: &'a TableDocument,
    ) -> impl Iterator<Item = String> + 'a {
        table.rows().iter().map(|row| self.render_row(row))
    }
}
