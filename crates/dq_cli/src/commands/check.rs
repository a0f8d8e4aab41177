use anyhow::{Context, Result};
use dq_core::{Rule, normalize_rules};
use dq_engine::{CompiledRule, SkipReason};
use dq_parser::parse_file;
use std::path::Path;
use tracing::info;

use crate::output;

/// A rule that will be skipped at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleIssue {
    pub rule_id: String,
    pub problem: String,
}

pub fn execute(rules_path: &Path, format: &str) -> Result<()> {
    info!("Checking rule table: {}", rules_path.display());

    let raw_rules = parse_file(rules_path)
        .with_context(|| format!("Failed to parse rule file: {}", rules_path.display()))?;
    let rules = normalize_rules(&raw_rules);

    if format != "json" {
        output::print_info(&format!("Rule table loaded: {} rules", rules.len()));
    }

    let issues = find_issues(&rules);
    output::print_check_report(&rules, &issues, format)
}

/// Finds the rules that cannot be evaluated regardless of the dataset.
pub fn find_issues(rules: &[Rule]) -> Vec<RuleIssue> {
    rules
        .iter()
        .filter_map(|rule| {
            let problem = match CompiledRule::compile(rule) {
                Err(reason) => reason.to_string(),
                Ok(_) if rule.column().is_none() => SkipReason::MissingColumn.to_string(),
                Ok(_) => return None,
            };
            Some(RuleIssue {
                rule_id: rule.rule_id.clone(),
                problem,
            })
        })
        .collect()
}
