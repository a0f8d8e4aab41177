//! Rule types and structures.
//!
//! A rule table row exists in two forms: [`RawRule`], exactly as loaded from a
//! rule file, and [`Rule`], the normalized form consumed by the engine.

use crate::RuleError;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity assigned to rules that do not declare one.
pub const DEFAULT_SEVERITY: &str = "medium";

/// The recognized rule table columns, in canonical order.
pub const RULE_COLUMNS: [&str; 7] = [
    "rule_id",
    "column_name",
    "rule_type",
    "param1",
    "param2",
    "severity",
    "description",
];

/// The closed set of supported rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Cell must not be missing
    NotNull,
    /// Numeric cell must be greater than or equal to `param1`
    Min,
    /// Numeric cell must be less than or equal to `param1`
    Max,
    /// Cell must be one of the comma-separated values in `param1`
    InList,
    /// Cell must match the regular expression in `param1`, anchored at the start
    Regex,
}

impl RuleKind {
    /// All supported kinds.
    pub const ALL: [RuleKind; 5] = [
        RuleKind::NotNull,
        RuleKind::Min,
        RuleKind::Max,
        RuleKind::InList,
        RuleKind::Regex,
    ];

    /// Returns the canonical upper-case token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::NotNull => "NOT_NULL",
            RuleKind::Min => "MIN",
            RuleKind::Max => "MAX",
            RuleKind::InList => "IN_LIST",
            RuleKind::Regex => "REGEX",
        }
    }

    /// Maps an already normalized token to a kind.
    ///
    /// The match is exact; use [`str::parse`] for lenient parsing.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "NOT_NULL" => Some(RuleKind::NotNull),
            "MIN" => Some(RuleKind::Min),
            "MAX" => Some(RuleKind::Max),
            "IN_LIST" => Some(RuleKind::InList),
            "REGEX" => Some(RuleKind::Regex),
            _ => None,
        }
    }

    /// Whether the remediation engine rewrites cells flagged by this kind.
    pub fn is_repairable(&self) -> bool {
        !matches!(self, RuleKind::Regex)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(&s.trim().to_uppercase())
            .ok_or_else(|| RuleError::UnsupportedRuleType(s.to_string()))
    }
}

/// One row of a rule table as loaded from a file.
///
/// Every column is optional. Scalars of any type are accepted and kept in
/// their string form, so `rule_id: 7` and `rule_id: "7"` load identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRule {
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,

    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,

    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub param1: Option<String>,

    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub param2: Option<String>,

    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawRule {
    /// Sets a recognized column by name.
    ///
    /// Returns `false` (and changes nothing) when `column` is not one of
    /// [`RULE_COLUMNS`].
    pub fn set(&mut self, column: &str, value: Option<String>) -> bool {
        let slot = match column {
            "rule_id" => &mut self.rule_id,
            "column_name" => &mut self.column_name,
            "rule_type" => &mut self.rule_type,
            "param1" => &mut self.param1,
            "param2" => &mut self.param2,
            "severity" => &mut self.severity,
            "description" => &mut self.description,
            _ => return false,
        };
        *slot = value;
        true
    }
}

impl From<&Rule> for RawRule {
    fn from(rule: &Rule) -> Self {
        Self {
            rule_id: Some(rule.rule_id.clone()),
            column_name: rule.column_name.clone(),
            rule_type: Some(rule.rule_type.clone()),
            param1: rule.param1.clone(),
            param2: rule.param2.clone(),
            severity: Some(rule.severity.clone()),
            description: Some(rule.description.clone()),
        }
    }
}

/// A normalized rule.
///
/// Produced by [`crate::normalize_rules`]. The rule type is kept as a token
/// rather than a [`RuleKind`] so unsupported rules survive normalization and
/// are filtered by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier (uniqueness assumed, not enforced)
    pub rule_id: String,

    /// Target dataset column
    pub column_name: Option<String>,

    /// Upper-cased, trimmed rule type token
    pub rule_type: String,

    /// First parameter (bound, allowed list or pattern)
    pub param1: Option<String>,

    /// Second parameter, preserved but unused by the current kinds
    pub param2: Option<String>,

    /// Free-form severity label
    pub severity: String,

    /// Human-readable description
    pub description: String,
}

impl Rule {
    /// Returns the supported kind of this rule, if any.
    pub fn kind(&self) -> Option<RuleKind> {
        RuleKind::from_token(&self.rule_type)
    }

    /// Returns true if the rule type is one of the supported kinds.
    pub fn is_supported(&self) -> bool {
        self.kind().is_some()
    }

    /// Returns the target column name.
    pub fn column(&self) -> Option<&str> {
        self.column_name.as_deref()
    }

    /// Returns the first parameter.
    pub fn param1(&self) -> Option<&str> {
        self.param1.as_deref()
    }
}

/// Deserializes any scalar into its string form; null becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientVisitor)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}
