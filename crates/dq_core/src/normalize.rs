//! Rule table normalization.
//!
//! Turns loosely typed rule rows into [`Rule`]s with every recognized column
//! present. Normalization never fails and never checks whether a rule type is
//! supported; unsupported rules are filtered by the engine.

use crate::{DEFAULT_SEVERITY, RawRule, Rule};

/// Normalizes a rule table, preserving row order.
///
/// Normalizing the raw form of an already normalized table is a no-op.
pub fn normalize_rules(raw: &[RawRule]) -> Vec<Rule> {
    raw.iter()
        .enumerate()
        .map(|(position, rule)| normalize_rule(rule, position))
        .collect()
}

/// Normalizes a single rule row.
///
/// `position` is the zero-based row position in the table and is only used to
/// synthesize an identifier for rows without one.
pub fn normalize_rule(raw: &RawRule, position: usize) -> Rule {
    let rule_id = match non_blank(raw.rule_id.as_deref()) {
        Some(id) => id.to_string(),
        None => format!("rule_{}", position + 1),
    };

    Rule {
        rule_id,
        column_name: non_blank(raw.column_name.as_deref()).map(str::to_string),
        rule_type: raw
            .rule_type
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_uppercase(),
        param1: non_blank(raw.param1.as_deref()).map(str::to_string),
        param2: non_blank(raw.param2.as_deref()).map(str::to_string),
        severity: non_blank(raw.severity.as_deref())
            .unwrap_or(DEFAULT_SEVERITY)
            .to_string(),
        description: raw.description.clone().unwrap_or_default(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
