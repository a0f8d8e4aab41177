//! Remediation of flagged cells.
//!
//! Remediation consumes the violations of an evaluation and returns a repaired
//! copy of the dataset. Only cells on flagged rows of the violated rule's
//! column are rewritten, and the input dataset is never touched.

use crate::evaluator::resolve_target;
use crate::{CellValue, CompiledRule, Dataset, SkipReason, SkippedRule, Violation, is_member};
use dq_core::{Rule, RuleKind, parse_allowed_list, parse_bound};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Value written into flagged NOT_NULL cells when the rule has no `param1`.
pub const DEFAULT_FILL_VALUE: &str = "UNKNOWN";

/// Value written into flagged IN_LIST cells when the allowed list is empty.
pub const DEFAULT_CATEGORY: &str = "OTHER";

/// How MIN/MAX repairs treat the non-flagged cells of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericCoercion {
    /// Only flagged rows are rewritten; every other cell stays as loaded
    #[default]
    FlaggedRows,
    /// The whole column is coerced to numbers first; non-numeric cells become null
    WholeColumn,
}

/// Options for the remediation engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemediationOptions {
    /// Numeric coercion policy for MIN/MAX repairs
    pub coercion: NumericCoercion,
}

impl RemediationOptions {
    /// Creates options with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the numeric coercion policy.
    pub fn with_coercion(mut self, coercion: NumericCoercion) -> Self {
        self.coercion = coercion;
        self
    }
}

/// Result of a remediation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RemediationReport {
    /// The repaired dataset
    pub cleaned: Dataset,

    /// Number of cells whose value changed
    pub cells_changed: usize,

    /// Rule ids whose repair was applied, ascending
    pub applied: Vec<String>,

    /// Violation groups that were not applied
    pub skipped: Vec<SkippedRule>,
}

/// Applies repairs for flagged rows.
#[derive(Debug, Clone, Default)]
pub struct Remediator {
    options: RemediationOptions,
}

/// A parsed repair action.
enum Repair {
    Fill(String),
    ClipMin(f64),
    ClipMax(f64),
    Replace(Vec<String>),
}

impl Remediator {
    /// Creates a remediator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a remediator with the given options.
    pub fn with_options(options: RemediationOptions) -> Self {
        Self { options }
    }

    /// Returns a repaired copy of `dataset`.
    pub fn remediate(&self, dataset: &Dataset, violations: &[Violation], rules: &[Rule]) -> Dataset {
        self.remediate_with_report(dataset, violations, rules).cleaned
    }

    /// Returns a repaired copy of `dataset` together with what was done.
    ///
    /// Violations are grouped by the rule that produced them and groups are
    /// applied in ascending id order, then table order. A group whose id is
    /// absent from `rules` is skipped. Rules sharing an id are told apart by
    /// the violation's column and reason.
    pub fn remediate_with_report(
        &self,
        dataset: &Dataset,
        violations: &[Violation],
        rules: &[Rule],
    ) -> RemediationReport {
        let mut report = RemediationReport {
            cleaned: dataset.clone(),
            cells_changed: 0,
            applied: Vec::new(),
            skipped: Vec::new(),
        };

        let mut groups: BTreeMap<(&str, Option<usize>), BTreeSet<usize>> = BTreeMap::new();
        for violation in violations {
            groups
                .entry((violation.rule_id.as_str(), owning_rule(rules, violation)))
                .or_default()
                .insert(violation.row_index);
        }

        for ((rule_id, position), rows) in groups {
            let Some(rule) = position.map(|p| &rules[p]) else {
                warn!(
                    "Ignoring {} violations of rule '{}' not present in rule table",
                    rows.len(),
                    rule_id
                );
                report
                    .skipped
                    .push(SkippedRule::new(rule_id, SkipReason::UnknownRule));
                continue;
            };

            match self.apply_group(dataset, &mut report.cleaned, rule, &rows) {
                Ok(Some(changed)) => {
                    debug!("Rule '{}' repaired {} cells", rule_id, changed);
                    report.cells_changed += changed;
                    report.applied.push(rule_id.to_string());
                }
                Ok(None) => debug!("Rule '{}' is flag-only, cells unchanged", rule_id),
                Err(reason) => {
                    debug!("Skipping remediation of rule '{}': {}", rule_id, reason);
                    report.skipped.push(SkippedRule::new(rule_id, reason));
                }
            }
        }

        report
    }

    /// Applies one rule's repair; `Ok(None)` means the rule never repairs.
    fn apply_group(
        &self,
        original: &Dataset,
        cleaned: &mut Dataset,
        rule: &Rule,
        rows: &BTreeSet<usize>,
    ) -> Result<Option<usize>, SkipReason> {
        let (column, _) = resolve_target(original, rule)?;
        let repair = match rule.kind() {
            Some(RuleKind::NotNull) => Repair::Fill(
                rule.param1()
                    .filter(|p| !p.is_empty())
                    .unwrap_or(DEFAULT_FILL_VALUE)
                    .to_string(),
            ),
            Some(RuleKind::Min) => Repair::ClipMin(parse_bound(rule.param1())?),
            Some(RuleKind::Max) => Repair::ClipMax(parse_bound(rule.param1())?),
            Some(RuleKind::InList) => Repair::Replace(parse_allowed_list(rule.param1())?),
            Some(RuleKind::Regex) => return Ok(None),
            None => return Err(SkipReason::UnsupportedRuleType(rule.rule_type.clone())),
        };

        let Some(values) = cleaned.column_mut(column) else {
            return Err(SkipReason::ColumnNotFound(column.to_string()));
        };
        let mut changed = 0;

        if matches!(repair, Repair::ClipMin(_) | Repair::ClipMax(_))
            && self.options.coercion == NumericCoercion::WholeColumn
        {
            for cell in values.iter_mut() {
                let coerced = coerce_numeric(cell);
                if !same_cell(cell, &coerced) {
                    *cell = coerced;
                    changed += 1;
                }
            }
        }

        for &row in rows {
            let Some(cell) = values.get_mut(row) else {
                warn!(
                    "Row {} flagged by rule '{}' is out of range ({} rows)",
                    row,
                    rule.rule_id,
                    original.len()
                );
                continue;
            };
            if let Some(repaired) = repair.apply(cell) {
                *cell = repaired;
                changed += 1;
            }
        }

        Ok(Some(changed))
    }
}

impl Repair {
    /// Returns the replacement for a flagged cell, or `None` to keep it.
    fn apply(&self, cell: &CellValue) -> Option<CellValue> {
        match self {
            Repair::Fill(fill) => cell.is_missing().then(|| CellValue::from(fill.as_str())),
            Repair::ClipMin(min) => {
                let value = cell.to_numeric()?;
                (value < *min).then(|| clip_to(cell, *min))
            }
            Repair::ClipMax(max) => {
                let value = cell.to_numeric()?;
                (value > *max).then(|| clip_to(cell, *max))
            }
            Repair::Replace(allowed) => {
                if is_member(cell, allowed) {
                    return None;
                }
                let replacement = allowed.first().map_or(DEFAULT_CATEGORY, String::as_str);
                Some(CellValue::from(replacement))
            }
        }
    }
}

/// Finds the position of the rule that produced `violation`.
///
/// With a unique id this is the rule carrying it. Among rules sharing an id,
/// the one targeting the violation's column with the same reason wins,
/// falling back to the first rule with that id.
fn owning_rule(rules: &[Rule], violation: &Violation) -> Option<usize> {
    let candidates: Vec<usize> = rules
        .iter()
        .enumerate()
        .filter(|(_, r)| r.rule_id == violation.rule_id)
        .map(|(position, _)| position)
        .collect();
    let first = *candidates.first()?;
    if candidates.len() == 1 {
        return Some(first);
    }

    let exact = candidates.into_iter().find(|&position| {
        let rule = &rules[position];
        rule.column() == Some(violation.column_name.as_str())
            && CompiledRule::compile(rule).is_ok_and(|c| c.reason() == violation.reason)
    });
    Some(exact.unwrap_or(first))
}

/// Builds the clipped value, keeping integer type when both sides allow it.
fn clip_to(cell: &CellValue, bound: f64) -> CellValue {
    let integral_bound = bound.fract() == 0.0 && bound.abs() < i64::MAX as f64;
    match cell {
        CellValue::Int(_) if integral_bound => CellValue::Int(bound as i64),
        _ => CellValue::Float(bound),
    }
}

/// Coerces a cell to a number; unparseable cells become null.
fn coerce_numeric(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Int(_) => cell.clone(),
        CellValue::Float(f) if f.is_nan() => CellValue::Null,
        CellValue::Float(_) => cell.clone(),
        CellValue::Bool(b) => CellValue::Int(i64::from(*b)),
        CellValue::String(s) => {
            let text = s.trim();
            if let Ok(i) = text.parse::<i64>() {
                CellValue::Int(i)
            } else {
                cell.to_numeric().map_or(CellValue::Null, CellValue::Float)
            }
        }
        CellValue::Null => CellValue::Null,
    }
}

/// Equality that treats two NaN floats as the same cell.
fn same_cell(a: &CellValue, b: &CellValue) -> bool {
    match (a, b) {
        (CellValue::Float(x), CellValue::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a == b,
    }
}

/// Returns a repaired copy of `dataset` using default options.
pub fn remediate(dataset: &Dataset, violations: &[Violation], rules: &[Rule]) -> Dataset {
    Remediator::new().remediate(dataset, violations, rules)
}
