//! Rule evaluation.
//!
//! Applies each normalized rule to its target column and emits one
//! [`Violation`] per offending row. Rules that cannot be applied are skipped
//! and reported, never raised.

use crate::predicate::compile_anchored;
use crate::{CellValue, CompiledRule, Dataset, SkipReason, SkippedRule, Violation};
use dq_core::Rule;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Result of evaluating a rule table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    /// Violations grouped by rule in table order, rows ascending
    pub violations: Vec<Violation>,

    /// Rules that were not applied
    pub skipped: Vec<SkippedRule>,

    /// Number of rules actually applied
    pub rules_evaluated: usize,
}

/// Evaluates rules against datasets.
///
/// Holds a cache of compiled REGEX patterns keyed by pattern text, so an
/// evaluator reused across runs compiles each pattern once.
#[derive(Debug, Default)]
pub struct RuleEvaluator {
    regex_cache: HashMap<String, Regex>,
}

impl RuleEvaluator {
    /// Creates a new evaluator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates all rules and returns the violations.
    pub fn evaluate(&mut self, dataset: &Dataset, rules: &[Rule]) -> Vec<Violation> {
        self.evaluate_with_report(dataset, rules).violations
    }

    /// Evaluates all rules, also reporting the skipped ones.
    pub fn evaluate_with_report(&mut self, dataset: &Dataset, rules: &[Rule]) -> EvaluationReport {
        let mut report = EvaluationReport::default();

        for rule in rules {
            match self.evaluate_rule(dataset, rule) {
                Ok(violations) => {
                    debug!(
                        "Rule '{}' ({}) flagged {} rows",
                        rule.rule_id,
                        rule.rule_type,
                        violations.len()
                    );
                    report.rules_evaluated += 1;
                    report.violations.extend(violations);
                }
                Err(reason) => {
                    debug!("Skipping rule '{}': {}", rule.rule_id, reason);
                    report
                        .skipped
                        .push(SkippedRule::new(rule.rule_id.clone(), reason));
                }
            }
        }

        report
    }

    fn evaluate_rule(
        &mut self,
        dataset: &Dataset,
        rule: &Rule,
    ) -> Result<Vec<Violation>, SkipReason> {
        let (column, values) = resolve_target(dataset, rule)?;
        let compiled = self.compile(rule)?;
        let reason = compiled.reason();

        Ok(values
            .iter()
            .enumerate()
            .filter(|(_, cell)| compiled.violates(cell))
            .map(|(row, cell)| Violation::new(rule, column, row, reason.clone(), cell.clone()))
            .collect())
    }

    fn compile(&mut self, rule: &Rule) -> Result<CompiledRule, SkipReason> {
        let cache = &mut self.regex_cache;
        CompiledRule::compile_with(rule, |pattern| {
            if let Some(regex) = cache.get(pattern) {
                return Ok(regex.clone());
            }
            let regex = compile_anchored(pattern)?;
            cache.insert(pattern.to_string(), regex.clone());
            Ok(regex)
        })
    }
}

/// Evaluates `rules` against `dataset` with a fresh evaluator.
pub fn evaluate(dataset: &Dataset, rules: &[Rule]) -> Vec<Violation> {
    RuleEvaluator::new().evaluate(dataset, rules)
}

/// Checks the rule type and resolves the target column.
pub(crate) fn resolve_target<'a>(
    dataset: &'a Dataset,
    rule: &'a Rule,
) -> Result<(&'a str, &'a [CellValue]), SkipReason> {
    if !rule.is_supported() {
        return Err(SkipReason::UnsupportedRuleType(rule.rule_type.clone()));
    }
    let column = rule.column().ok_or(SkipReason::MissingColumn)?;
    let values = dataset
        .column(column)
        .ok_or_else(|| SkipReason::ColumnNotFound(column.to_string()))?;
    Ok((column, values))
}
