//! Descriptive column profiling.

use crate::{CellValue, Dataset};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Type label for a column mixing several cell types.
pub const MIXED_DTYPE: &str = "mixed";

/// Descriptive statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub column_name: String,
    pub dtype: String,
    pub row_count: usize,
    pub non_null_count: usize,
    pub null_count: usize,
    pub null_percent: f64,
    pub distinct_count: usize,
}

impl ColumnProfile {
    /// Profiles a single column.
    pub fn from_values(name: &str, values: &[CellValue]) -> Self {
        let row_count = values.len();
        let present: Vec<&CellValue> = values.iter().filter(|v| !v.is_missing()).collect();
        let null_count = row_count - present.len();

        let distinct: HashSet<String> = present.iter().map(|v| v.to_string()).collect();

        Self {
            column_name: name.to_string(),
            dtype: infer_dtype(&present).to_string(),
            row_count,
            non_null_count: present.len(),
            null_count,
            null_percent: percent(null_count, row_count),
            distinct_count: distinct.len(),
        }
    }
}

/// Profiles every column of `dataset`, in column order.
pub fn profile_dataset(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset
        .columns()
        .map(|(name, values)| ColumnProfile::from_values(name, values))
        .collect()
}

fn infer_dtype(present: &[&CellValue]) -> &'static str {
    let mut types = present.iter().map(|v| v.type_name());
    match types.next() {
        None => CellValue::Null.type_name(),
        Some(first) if types.all(|t| t == first) => first,
        Some(_) => MIXED_DTYPE,
    }
}

/// `part / whole` as a percentage, 0 when `whole` is zero.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
