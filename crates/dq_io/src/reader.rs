//! CSV dataset reader.

use crate::{Result, record_batches_to_dataset};
use arrow_csv::ReaderBuilder;
use arrow_csv::reader::Format;
use arrow_schema::{DataType, Field, Schema};
use dq_engine::Dataset;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Reads a CSV file with a header row into a dataset.
///
/// Column types are inferred from the data: integers, floats and booleans
/// are kept, every other type is read as text. Empty cells are null.
pub fn read_csv_dataset(path: &Path) -> Result<Dataset> {
    info!("Reading dataset from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    read_csv_str(&content)
}

/// Reads CSV text with a header row into a dataset.
pub fn read_csv_str(content: &str) -> Result<Dataset> {
    if content.trim().is_empty() {
        return Ok(Dataset::empty());
    }

    let format = Format::default().with_header(true);
    let (inferred, records) = format.infer_schema(Cursor::new(content.as_bytes()), None)?;
    let schema = Arc::new(sanitize_schema(&inferred));
    debug!("Inferred schema from {} records: {:?}", records, schema);

    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(Cursor::new(content.as_bytes()))?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let dataset = record_batches_to_dataset(&schema, &batches)?;
    info!(
        "Loaded dataset with {} rows and {} columns",
        dataset.len(),
        dataset.width()
    );
    Ok(dataset)
}

/// Keeps the types the engine understands and reads everything else as text.
fn sanitize_schema(inferred: &Schema) -> Schema {
    let fields = inferred
        .fields()
        .iter()
        .map(|field| {
            let data_type = match field.data_type() {
                DataType::Boolean => DataType::Boolean,
                DataType::Int64 => DataType::Int64,
                DataType::Float64 => DataType::Float64,
                _ => DataType::Utf8,
            };
            Field::new(field.name(), data_type, true)
        })
        .collect::<Vec<_>>();
    Schema::new(fields)
}
