//! # Data Quality Core
//!
//! Core data structures for the rule-driven data quality engine.
//!
//! A rule table is a declarative list of single-column constraints. This crate
//! defines the raw (as loaded) and normalized forms of a rule, the closed set of
//! supported rule kinds, and the parameter parsing shared by the evaluator and
//! the remediation engine.
//!
//! ## Key Concepts
//!
//! - **RawRule**: one row of a rule table as read from a file, every column optional
//! - **Rule**: the normalized form, with all recognized columns present
//! - **RuleKind**: the supported rule types (`NOT_NULL`, `MIN`, `MAX`, `IN_LIST`, `REGEX`)
//!
//! ## Example
//!
//! ```rust
//! use dq_core::{normalize_rules, RawRule, RuleKind};
//!
//! let raw = vec![RawRule {
//!     rule_id: Some("r1".to_string()),
//!     column_name: Some("age".to_string()),
//!     rule_type: Some(" min ".to_string()),
//!     param1: Some("0".to_string()),
//!     ..Default::default()
//! }];
//!
//! let rules = normalize_rules(&raw);
//! assert_eq!(rules[0].rule_type, "MIN");
//! assert_eq!(rules[0].kind(), Some(RuleKind::Min));
//! assert_eq!(rules[0].severity, "medium");
//! ```

pub mod builder;
pub mod error;
pub mod normalize;
pub mod params;
pub mod rule;

pub use builder::*;
pub use error::*;
pub use normalize::*;
pub use params::*;
pub use rule::*;
