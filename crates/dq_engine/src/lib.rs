//! # Data Quality Engine
//!
//! Rule evaluation and remediation over in-memory tabular data. This crate
//! provides:
//!
//! - A columnar [`Dataset`] with stable zero-based row indices
//! - The rule evaluator, emitting one [`Violation`] per offending row
//! - The remediation engine, repairing only the rows that were flagged
//! - Descriptive profiling and before/after KPIs
//! - A [`QualityPipeline`] that chains all of the above
//!
//! ## Example
//!
//! ```rust
//! use dq_core::{RuleBuilder, RuleKind};
//! use dq_engine::{evaluate, remediate, CellValue, Dataset};
//!
//! let dataset = Dataset::from_columns(vec![(
//!     "age",
//!     vec![CellValue::Int(10), CellValue::Int(-5), CellValue::Null],
//! )])
//! .unwrap();
//! let rules = vec![RuleBuilder::new("r1", "age", RuleKind::Min).param1("0").build()];
//!
//! let violations = evaluate(&dataset, &rules);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].row_index, 1);
//!
//! let cleaned = remediate(&dataset, &violations, &rules);
//! assert_eq!(cleaned.get(1, "age"), Some(&CellValue::Int(0)));
//! assert_eq!(dataset.get(1, "age"), Some(&CellValue::Int(-5)));
//! ```

mod dataset;
mod error;
mod evaluator;
mod kpi;
mod pipeline;
mod predicate;
mod profile;
mod remediation;
mod tables;
mod violation;

pub use dataset::*;
pub use error::*;
pub use evaluator::*;
pub use kpi::*;
pub use pipeline::*;
pub use predicate::*;
pub use profile::*;
pub use remediation::*;
pub use tables::*;
pub use violation::*;
