//! Violation records.

use crate::CellValue;
use dq_core::Rule;
use serde::{Deserialize, Serialize};

/// Output column order of a violations table.
pub const VIOLATION_COLUMNS: [&str; 7] = [
    "row_index",
    "rule_id",
    "column_name",
    "severity",
    "description",
    "reason",
    "value",
];

/// A single rule violation on one dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Zero-based row index in the evaluated dataset
    pub row_index: usize,

    /// Identifier of the violated rule
    pub rule_id: String,

    /// Column the rule targets
    pub column_name: String,

    /// Severity copied from the rule
    pub severity: String,

    /// Description copied from the rule
    pub description: String,

    /// Why the cell failed
    pub reason: String,

    /// Original cell value, before any numeric coercion
    pub value: CellValue,
}

impl Violation {
    /// Creates a violation for `rule` on `row_index`.
    pub fn new(
        rule: &Rule,
        column_name: &str,
        row_index: usize,
        reason: impl Into<String>,
        value: CellValue,
    ) -> Self {
        Self {
            row_index,
            rule_id: rule.rule_id.clone(),
            column_name: column_name.to_string(),
            severity: rule.severity.clone(),
            description: rule.description.clone(),
            reason: reason.into(),
            value,
        }
    }
}
