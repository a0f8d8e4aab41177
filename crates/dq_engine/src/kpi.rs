//! Before/after quality indicators.

use crate::profile::percent;
use crate::{Dataset, Violation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dataset-level indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Share of non-missing cells in the input, in `[0, 1]`
    pub overall_completeness_before: f64,

    /// Share of non-missing cells after remediation, in `[0, 1]`
    pub overall_completeness_after: f64,

    /// Number of violations found
    pub total_violations: usize,
}

/// Per-column indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnKpi {
    pub column_name: String,
    pub null_count_before: usize,
    pub null_count_after: usize,
    pub null_percent_before: f64,
    pub null_percent_after: f64,
    pub violation_count: usize,
}

/// Computes the KPI summary and the per-column KPI rows.
///
/// Completeness is measured over the cells of `original`; columns are listed
/// in `original` order. `cleaned` is expected to have the same shape, and a
/// column absent from it counts as fully missing.
pub fn compute_kpis(
    original: &Dataset,
    cleaned: &Dataset,
    violations: &[Violation],
) -> (KpiSummary, Vec<ColumnKpi>) {
    let total_cells = original.cell_count();
    let total_rows = original.len();

    let mut per_column: HashMap<&str, usize> = HashMap::new();
    for violation in violations {
        *per_column.entry(violation.column_name.as_str()).or_default() += 1;
    }

    let mut nulls_before = 0;
    let mut nulls_after = 0;
    let column_kpis: Vec<ColumnKpi> = original
        .columns()
        .map(|(name, values)| {
            let before = values.iter().filter(|v| v.is_missing()).count();
            let after = cleaned
                .column(name)
                .map_or(total_rows, |c| c.iter().filter(|v| v.is_missing()).count());
            nulls_before += before;
            nulls_after += after;

            ColumnKpi {
                column_name: name.to_string(),
                null_count_before: before,
                null_count_after: after,
                null_percent_before: percent(before, total_rows),
                null_percent_after: percent(after, total_rows),
                violation_count: per_column.get(name).copied().unwrap_or(0),
            }
        })
        .collect();

    let summary = KpiSummary {
        overall_completeness_before: completeness(nulls_before, total_cells),
        overall_completeness_after: completeness(nulls_after, total_cells),
        total_violations: violations.len(),
    };

    (summary, column_kpis)
}

fn completeness(nulls: usize, cells: usize) -> f64 {
    if cells == 0 {
        1.0
    } else {
        1.0 - nulls as f64 / cells as f64
    }
}
