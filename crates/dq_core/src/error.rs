//! Error types for rule handling.
//!
//! None of these errors abort a pipeline run: the evaluator and the
//! remediation engine turn them into skipped rules.

use thiserror::Error;

/// Errors raised when interpreting a rule definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule type token is not one of the supported kinds
    #[error("Unsupported rule type: '{0}'")]
    UnsupportedRuleType(String),
}

/// Errors raised when parsing a rule parameter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The rule kind requires `param1` but none was given
    #[error("required parameter is missing")]
    MissingParameter,

    /// A numeric bound could not be parsed
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}
