//! Compiled rule predicates.
//!
//! A [`CompiledRule`] is a rule whose parameters have been parsed and
//! validated. Compilation either succeeds or yields a [`SkipReason`]; there is
//! no partially compiled rule.

use crate::{CellValue, SkipReason};
use dq_core::{Rule, RuleKind, parse_allowed_list, parse_bound, require_pattern};
use regex::Regex;

/// A rule ready to be applied to cells.
#[derive(Debug, Clone)]
pub enum CompiledRule {
    /// Violates when the cell is missing
    NotNull,
    /// Violates when the numeric value is below the bound
    Min(f64),
    /// Violates when the numeric value is above the bound
    Max(f64),
    /// Violates when the cell is not one of the allowed values
    InList(Vec<String>),
    /// Violates when the cell text does not match at its start
    Regex {
        /// Pattern as written in the rule table
        pattern: String,
        /// Compiled, start-anchored expression
        regex: Regex,
    },
}

impl CompiledRule {
    /// Compiles a rule, validating its type and parameters.
    ///
    /// REGEX patterns are compiled here; callers that evaluate many rules
    /// should go through [`crate::RuleEvaluator`], which caches them.
    pub fn compile(rule: &Rule) -> Result<Self, SkipReason> {
        Self::compile_with(rule, compile_anchored)
    }

    /// Compiles a rule, obtaining REGEX patterns from `regex_for`.
    pub(crate) fn compile_with<F>(rule: &Rule, regex_for: F) -> Result<Self, SkipReason>
    where
        F: FnOnce(&str) -> Result<Regex, SkipReason>,
    {
        let kind = rule
            .kind()
            .ok_or_else(|| SkipReason::UnsupportedRuleType(rule.rule_type.clone()))?;

        Ok(match kind {
            RuleKind::NotNull => CompiledRule::NotNull,
            RuleKind::Min => CompiledRule::Min(parse_bound(rule.param1())?),
            RuleKind::Max => CompiledRule::Max(parse_bound(rule.param1())?),
            RuleKind::InList => CompiledRule::InList(parse_allowed_list(rule.param1())?),
            RuleKind::Regex => {
                let pattern = require_pattern(rule.param1())?;
                CompiledRule::Regex {
                    pattern: pattern.to_string(),
                    regex: regex_for(pattern)?,
                }
            }
        })
    }

    /// Returns the kind this rule was compiled from.
    pub fn kind(&self) -> RuleKind {
        match self {
            CompiledRule::NotNull => RuleKind::NotNull,
            CompiledRule::Min(_) => RuleKind::Min,
            CompiledRule::Max(_) => RuleKind::Max,
            CompiledRule::InList(_) => RuleKind::InList,
            CompiledRule::Regex { .. } => RuleKind::Regex,
        }
    }

    /// Returns true if the cell violates this rule.
    pub fn violates(&self, cell: &CellValue) -> bool {
        match self {
            CompiledRule::NotNull => cell.is_missing(),
            CompiledRule::Min(min) => cell.to_numeric().is_some_and(|v| v < *min),
            CompiledRule::Max(max) => cell.to_numeric().is_some_and(|v| v > *max),
            CompiledRule::InList(allowed) => !is_member(cell, allowed),
            CompiledRule::Regex { regex, .. } => !regex.is_match(&cell.to_string()),
        }
    }

    /// Computes the violation mask over a column, one entry per row.
    pub fn mask(&self, values: &[CellValue]) -> Vec<bool> {
        values.iter().map(|cell| self.violates(cell)).collect()
    }

    /// Human-readable reason attached to every violation of this rule.
    pub fn reason(&self) -> String {
        match self {
            CompiledRule::NotNull => "Value is NULL".to_string(),
            CompiledRule::Min(min) => format!("Value < MIN ({:?})", min),
            CompiledRule::Max(max) => format!("Value > MAX ({:?})", max),
            CompiledRule::InList(allowed) => {
                format!("Value not in allowed list: [{}]", allowed.join(", "))
            }
            CompiledRule::Regex { pattern, .. } => {
                format!("Value does not match regex: {}", pattern)
            }
        }
    }
}

/// Returns true if the cell is one of the allowed values.
///
/// Missing cells are never members. Other cells are compared through their
/// text form, case-sensitively.
pub fn is_member(cell: &CellValue, allowed: &[String]) -> bool {
    if cell.is_missing() {
        return false;
    }
    let text = cell.to_string();
    allowed.iter().any(|a| *a == text)
}

/// Compiles a pattern so that it must match at the start of the text.
///
/// The pattern is validated on its own first, so unbalanced groups cannot
/// escape the anchoring group.
pub(crate) fn compile_anchored(pattern: &str) -> Result<Regex, SkipReason> {
    let invalid = |e: regex::Error| SkipReason::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    };
    Regex::new(pattern).map_err(invalid)?;
    Regex::new(&format!(r"\A(?:{})", pattern)).map_err(invalid)
}
