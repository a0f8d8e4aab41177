//! Tabular views of pipeline outputs.
//!
//! Violations, profiles and KPIs are converted to [`Dataset`]s so they can be
//! written with the same writers as the cleaned data.

use crate::{CellValue, ColumnKpi, ColumnProfile, Dataset, EngineError, VIOLATION_COLUMNS, Violation};

/// Output column order of a profile table.
pub const PROFILE_COLUMNS: [&str; 7] = [
    "column_name",
    "dtype",
    "row_count",
    "non_null_count",
    "null_count",
    "null_percent",
    "distinct_count",
];

/// Output column order of a column KPI table.
pub const KPI_COLUMNS: [&str; 6] = [
    "column_name",
    "null_count_before",
    "null_count_after",
    "null_percent_before",
    "null_percent_after",
    "violation_count",
];

/// Builds the violations table. An empty list still yields the full header.
pub fn violations_table(violations: &[Violation]) -> Result<Dataset, EngineError> {
    let rows = violations
        .iter()
        .map(|v| {
            vec![
                count(v.row_index),
                CellValue::from(v.rule_id.as_str()),
                CellValue::from(v.column_name.as_str()),
                CellValue::from(v.severity.as_str()),
                CellValue::from(v.description.as_str()),
                CellValue::from(v.reason.as_str()),
                v.value.clone(),
            ]
        })
        .collect();
    Dataset::from_rows(VIOLATION_COLUMNS.to_vec(), rows)
}

/// Builds the profile table.
pub fn profile_table(profiles: &[ColumnProfile]) -> Result<Dataset, EngineError> {
    let rows = profiles
        .iter()
        .map(|p| {
            vec![
                CellValue::from(p.column_name.as_str()),
                CellValue::from(p.dtype.as_str()),
                count(p.row_count),
                count(p.non_null_count),
                count(p.null_count),
                CellValue::Float(p.null_percent),
                count(p.distinct_count),
            ]
        })
        .collect();
    Dataset::from_rows(PROFILE_COLUMNS.to_vec(), rows)
}

/// Builds the column KPI table.
pub fn kpi_table(kpis: &[ColumnKpi]) -> Result<Dataset, EngineError> {
    let rows = kpis
        .iter()
        .map(|k| {
            vec![
                CellValue::from(k.column_name.as_str()),
                count(k.null_count_before),
                count(k.null_count_after),
                CellValue::Float(k.null_percent_before),
                CellValue::Float(k.null_percent_after),
                count(k.violation_count),
            ]
        })
        .collect();
    Dataset::from_rows(KPI_COLUMNS.to_vec(), rows)
}

fn count(n: usize) -> CellValue {
    i64::try_from(n).map_or(CellValue::Float(n as f64), CellValue::Int)
}
