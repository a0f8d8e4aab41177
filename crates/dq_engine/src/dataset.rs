//! Dataset representation.
//!
//! A dataset is an ordered set of named columns of equal length. Rows are
//! addressed by their zero-based position, which never changes: no operation in
//! this crate reorders, inserts or removes rows.

use crate::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A value in a dataset cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null/missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl CellValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns true if this value counts as missing: null or a NaN float.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "boolean",
            CellValue::Int(_) => "int64",
            CellValue::Float(_) => "float64",
            CellValue::String(_) => "string",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Best-effort numeric coercion.
    ///
    /// Integers, non-NaN floats and booleans (as 1/0) convert directly;
    /// strings convert when they parse as a float after trimming. Everything
    /// else is unparseable and yields `None`.
    pub fn to_numeric(&self) -> Option<f64> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) if f.is_nan() => None,
            CellValue::Float(f) => Some(*f),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| !f.is_nan()),
        }
    }
}

/// Text form of a cell: empty for missing values, one decimal for integral floats.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) if v.is_nan() => Ok(()),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{:.1}", v)
            }
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<CellValue>,
}

/// A columnar dataset with stable row indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Creates a new empty dataset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a dataset from `(name, values)` pairs, in order.
    ///
    /// All columns must have the same length and distinct names.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        let mut dataset = Self::empty();
        let mut seen = HashSet::new();

        for (index, (name, values)) in columns.into_iter().enumerate() {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(EngineError::DuplicateColumn(name));
            }
            if index == 0 {
                dataset.row_count = values.len();
            } else if values.len() != dataset.row_count {
                return Err(EngineError::LengthMismatch {
                    column: name,
                    expected: dataset.row_count,
                    actual: values.len(),
                });
            }
            dataset.columns.push(Column { name, values });
        }

        Ok(dataset)
    }

    /// Creates a dataset from a header and row-major values.
    pub fn from_rows<S: Into<String>>(
        column_names: Vec<S>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, EngineError> {
        let names: Vec<String> = column_names.into_iter().map(Into::into).collect();
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); names.len()];

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(EngineError::RowWidthMismatch {
                    row: row_idx,
                    expected: names.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        Self::from_columns(names.into_iter().zip(columns))
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns the total number of cells (rows × columns).
    pub fn cell_count(&self) -> usize {
        self.row_count * self.columns.len()
    }

    /// Returns the column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns true if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Returns the values of a column.
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Returns the values of a column for in-place rewriting.
    ///
    /// A slice is returned so the column length cannot change.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut [CellValue]> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .map(|c| c.values.as_mut_slice())
    }

    /// Returns an iterator over `(name, values)` pairs, in order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.values.as_slice()))
    }

    /// Gets a single cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.column(column).and_then(|values| values.get(row))
    }

    /// Counts missing cells across the whole dataset.
    pub fn missing_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter())
            .filter(|v| v.is_missing())
            .count()
    }
}
