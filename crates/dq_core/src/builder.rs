//! Builder pattern for creating rules.
//!
//! Provides a fluent API for constructing normalized rules in code, mostly
//! useful for tests and for callers that define rules programmatically.

use crate::{RawRule, Rule, RuleKind, normalize_rule};

/// Builder for creating a normalized [`Rule`].
///
/// # Example
///
/// ```rust
/// use dq_core::{RuleBuilder, RuleKind};
///
/// let rule = RuleBuilder::new("r1", "status", RuleKind::InList)
///     .param1("OPEN,CLOSED")
///     .severity("high")
///     .description("Status must be a known value")
///     .build();
///
/// assert_eq!(rule.rule_type, "IN_LIST");
/// assert_eq!(rule.severity, "high");
/// ```
#[derive(Debug, Default)]
pub struct RuleBuilder {
    raw: RawRule,
}

impl RuleBuilder {
    /// Creates a builder for a supported rule kind.
    pub fn new(rule_id: impl Into<String>, column: impl Into<String>, kind: RuleKind) -> Self {
        Self::with_type(rule_id, column, kind.as_str())
    }

    /// Creates a builder with an arbitrary rule type token.
    pub fn with_type(
        rule_id: impl Into<String>,
        column: impl Into<String>,
        rule_type: impl Into<String>,
    ) -> Self {
        Self {
            raw: RawRule {
                rule_id: Some(rule_id.into()),
                column_name: Some(column.into()),
                rule_type: Some(rule_type.into()),
                ..Default::default()
            },
        }
    }

    /// Sets the first parameter.
    pub fn param1(mut self, value: impl Into<String>) -> Self {
        self.raw.param1 = Some(value.into());
        self
    }

    /// Sets the second parameter.
    pub fn param2(mut self, value: impl Into<String>) -> Self {
        self.raw.param2 = Some(value.into());
        self
    }

    /// Sets the severity.
    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.raw.severity = Some(severity.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.raw.description = Some(description.into());
        self
    }

    /// Returns the raw (un-normalized) row.
    pub fn build_raw(self) -> RawRule {
        self.raw
    }

    /// Builds the normalized rule.
    pub fn build(self) -> Rule {
        normalize_rule(&self.raw, 0)
    }
}
