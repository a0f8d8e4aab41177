//! Type conversion between Arrow arrays and dataset cells.

use crate::{IoError, Result};
use arrow_array::array::*;
use arrow_array::{RecordBatch, RecordBatchOptions};
use arrow_schema::{DataType, Field, Schema};
use dq_engine::{CellValue, Dataset};
use std::sync::Arc;
use tracing::warn;

fn downcast<'a, T: 'static>(array: &'a ArrayRef, name: &str) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| IoError::TypeConversionError(format!("Failed to downcast to {}", name)))
}

/// Converts one Arrow value to a dataset cell.
pub fn arrow_value_to_cell(array: &ArrayRef, row_idx: usize) -> Result<CellValue> {
    if array.is_null(row_idx) {
        return Ok(CellValue::Null);
    }

    let cell = match array.data_type() {
        DataType::Boolean => {
            CellValue::Bool(downcast::<BooleanArray>(array, "BooleanArray")?.value(row_idx))
        }
        DataType::Int32 => {
            CellValue::Int(downcast::<Int32Array>(array, "Int32Array")?.value(row_idx) as i64)
        }
        DataType::Int64 => CellValue::Int(downcast::<Int64Array>(array, "Int64Array")?.value(row_idx)),
        DataType::Float32 => {
            CellValue::Float(downcast::<Float32Array>(array, "Float32Array")?.value(row_idx) as f64)
        }
        DataType::Float64 => {
            CellValue::Float(downcast::<Float64Array>(array, "Float64Array")?.value(row_idx))
        }
        DataType::Utf8 => CellValue::String(
            downcast::<StringArray>(array, "StringArray")?
                .value(row_idx)
                .to_string(),
        ),
        DataType::LargeUtf8 => CellValue::String(
            downcast::<LargeStringArray>(array, "LargeStringArray")?
                .value(row_idx)
                .to_string(),
        ),
        other => {
            warn!("Unsupported Arrow type for conversion: {:?}", other);
            CellValue::Null
        }
    };

    Ok(cell)
}

/// Converts a whole Arrow array to cells.
pub fn array_to_cells(array: &ArrayRef) -> Result<Vec<CellValue>> {
    (0..array.len())
        .map(|row| arrow_value_to_cell(array, row))
        .collect()
}

/// Builds a dataset from record batches sharing `schema`.
pub fn record_batches_to_dataset(schema: &Schema, batches: &[RecordBatch]) -> Result<Dataset> {
    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); schema.fields().len()];

    for batch in batches {
        for (values, array) in columns.iter_mut().zip(batch.columns()) {
            values.extend(array_to_cells(array)?);
        }
    }

    let names = schema.fields().iter().map(|f| f.name().clone());
    Ok(Dataset::from_columns(names.zip(columns))?)
}

/// Picks the Arrow type for a column from its non-missing cells.
///
/// Integers stay `Int64`, numbers mixing integers and floats become `Float64`
/// and booleans `Boolean`. Anything else, including all-missing columns, is
/// written as `Utf8` text.
pub fn column_data_type(values: &[CellValue]) -> DataType {
    let mut present = values.iter().filter(|v| !v.is_missing()).peekable();
    if present.peek().is_none() {
        return DataType::Utf8;
    }

    let (mut ints, mut floats, mut bools, mut other) = (false, false, false, false);
    for value in present {
        match value {
            CellValue::Int(_) => ints = true,
            CellValue::Float(_) => floats = true,
            CellValue::Bool(_) => bools = true,
            _ => other = true,
        }
    }

    match (ints, floats, bools, other) {
        (true, false, false, false) => DataType::Int64,
        (_, true, false, false) => DataType::Float64,
        (false, false, true, false) => DataType::Boolean,
        _ => DataType::Utf8,
    }
}

/// Converts cells to an Arrow array of [`column_data_type`].
pub fn cells_to_array(values: &[CellValue]) -> ArrayRef {
    match column_data_type(values) {
        DataType::Int64 => Arc::new(
            values
                .iter()
                .map(|v| v.as_int())
                .collect::<Int64Array>(),
        ),
        DataType::Float64 => Arc::new(
            values
                .iter()
                .map(|v| v.as_float().filter(|f| !f.is_nan()))
                .collect::<Float64Array>(),
        ),
        DataType::Boolean => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        ),
        _ => Arc::new(
            values
                .iter()
                .map(|v| (!v.is_missing()).then(|| v.to_string()))
                .collect::<StringArray>(),
        ),
    }
}

/// Converts a dataset to a single record batch.
pub fn dataset_to_record_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(dataset.width());
    let mut arrays = Vec::with_capacity(dataset.width());

    for (name, values) in dataset.columns() {
        let array = cells_to_array(values);
        fields.push(Field::new(name, array.data_type().clone(), true));
        arrays.push(array);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(dataset.len()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}
