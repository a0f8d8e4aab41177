//! Error types for engine operations.

use dq_core::ParamError;
use serde::Serialize;
use thiserror::Error;

/// Structural errors when building a dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A column does not have the same number of rows as the first one
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Two columns share a name
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A row does not have one value per column
    #[error("Row {row} has {actual} values, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Why a rule (or a group of violations) was not applied.
///
/// Malformed rules never abort a run; they are reported with one of these
/// reasons and contribute no violations and no repairs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SkipReason {
    /// Rule type is not one of the supported kinds
    #[error("unsupported rule type '{0}'")]
    UnsupportedRuleType(String),

    /// Rule has no target column
    #[error("rule has no target column")]
    MissingColumn,

    /// Target column is not in the dataset
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Rule parameter is missing or unparseable
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    /// REGEX pattern does not compile
    #[error("invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Violations reference a rule id absent from the rule table
    #[error("rule id not present in rule table")]
    UnknownRule,
}

/// A rule that produced no violations or repairs, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRule {
    /// Identifier of the skipped rule
    pub rule_id: String,

    /// Why it was skipped
    #[serde(serialize_with = "serialize_display")]
    pub reason: SkipReason,
}

impl SkippedRule {
    pub fn new(rule_id: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            rule_id: rule_id.into(),
            reason,
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    reason: &SkipReason,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}
