use datasweep_core::{AppError, AppResult};

/// Numeric cell payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
}

/// One classified spreadsheet cell.
///
/// Readers classify each cell individually when the table is loaded; there
/// is no column-wide type inference.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty, missing, or not-a-number cell.
    Null,
    /// Integer or floating-point cell.
    Numeric(Numeric),
    /// Anything else, carried as its string form.
    Text(String),
}

impl CellValue {
    /// Creates an integer cell.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::Numeric(Numeric::Integer(value))
    }

    /// Creates a float cell, mapping NaN to [`CellValue::Null`].
    #[must_use]
    pub fn float(value: f64) -> Self {
        if value.is_nan() {
            return Self::Null;
        }

        Self::Numeric(Numeric::Float(value))
    }

    /// Creates a text cell.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for null cells.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Header plus rows loaded from a spreadsheet source.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDocument {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TableDocument {
    /// Creates a table, requiring every row to match the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> AppResult<Self> {
        if columns.is_empty() && !rows.is_empty() {
            return Err(AppError::Validation(
                "table with rows must declare at least one column".to_owned(),
            ));
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(AppError::Validation(format!(
                "row {index} has {} cells but the table has {} columns",
                row.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, rows })
    }

    /// Returns column names in source order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        self.columns.as_slice()
    }

    /// Returns rows in source order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        self.rows.as_slice()
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
