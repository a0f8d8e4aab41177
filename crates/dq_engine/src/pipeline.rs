//! End-to-end quality pipeline.
//!
//! Chains profiling, rule normalization, evaluation, remediation and KPI
//! computation over one dataset and one rule table.

use crate::{
    ColumnKpi, ColumnProfile, Dataset, KpiSummary, RemediationOptions, Remediator, RuleEvaluator,
    SkippedRule, Violation, compute_kpis, profile_dataset,
};
use chrono::{DateTime, Utc};
use dq_core::{RawRule, Rule, normalize_rules};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Options for a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub remediation: RemediationOptions,
}

/// Counters and timing of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStats {
    pub rows: usize,
    pub columns: usize,
    pub rules_total: usize,
    pub rules_evaluated: usize,
    pub rules_skipped: usize,
    pub violations: usize,
    pub cells_changed: usize,
    pub duration_ms: u64,
    pub generated_at: DateTime<Utc>,
}

/// Everything a pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Profile of the input dataset
    pub profile: Vec<ColumnProfile>,

    /// Normalized rule table
    pub rules: Vec<Rule>,

    /// Violations found in the input dataset
    pub violations: Vec<Violation>,

    /// Rules skipped during evaluation
    pub skipped: Vec<SkippedRule>,

    /// Remediated copy of the input dataset
    pub cleaned: Dataset,

    pub kpi_summary: KpiSummary,
    pub column_kpis: Vec<ColumnKpi>,
    pub stats: PipelineStats,
}

/// Runs the full data quality pipeline.
///
/// # Example
///
/// ```rust
/// use dq_core::RawRule;
/// use dq_engine::{CellValue, Dataset, QualityPipeline};
///
/// let dataset = Dataset::from_columns(vec![("city", vec![CellValue::Null])]).unwrap();
/// let rules = vec![RawRule {
///     rule_id: Some("r1".to_string()),
///     column_name: Some("city".to_string()),
///     rule_type: Some("not_null".to_string()),
///     ..Default::default()
/// }];
///
/// let outcome = QualityPipeline::new().run(&dataset, &rules);
/// assert_eq!(outcome.violations.len(), 1);
/// assert_eq!(outcome.cleaned.get(0, "city"), Some(&CellValue::from("UNKNOWN")));
/// ```
#[derive(Debug, Default)]
pub struct QualityPipeline {
    evaluator: RuleEvaluator,
    remediator: Remediator,
}

impl QualityPipeline {
    /// Creates a pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline with the given options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self {
            evaluator: RuleEvaluator::new(),
            remediator: Remediator::with_options(options.remediation),
        }
    }

    /// Runs the pipeline. Malformed rules are skipped, never raised.
    pub fn run(&mut self, dataset: &Dataset, raw_rules: &[RawRule]) -> PipelineOutcome {
        let start = Instant::now();
        info!(
            "Running quality pipeline on {} rows x {} columns with {} rules",
            dataset.len(),
            dataset.width(),
            raw_rules.len()
        );

        // 1. Profiling
        let profile = profile_dataset(dataset);

        // 2. Rules and violations
        let rules = normalize_rules(raw_rules);
        let evaluation = self.evaluator.evaluate_with_report(dataset, &rules);
        info!(
            "Evaluated {} rules ({} skipped), found {} violations",
            evaluation.rules_evaluated,
            evaluation.skipped.len(),
            evaluation.violations.len()
        );

        // 3. Remediation
        let remediation =
            self.remediator
                .remediate_with_report(dataset, &evaluation.violations, &rules);
        info!(
            "Remediation changed {} cells across {} rules",
            remediation.cells_changed,
            remediation.applied.len()
        );

        // 4. KPIs
        let (kpi_summary, column_kpis) =
            compute_kpis(dataset, &remediation.cleaned, &evaluation.violations);

        let stats = PipelineStats {
            rows: dataset.len(),
            columns: dataset.width(),
            rules_total: rules.len(),
            rules_evaluated: evaluation.rules_evaluated,
            rules_skipped: evaluation.skipped.len(),
            violations: evaluation.violations.len(),
            cells_changed: remediation.cells_changed,
            duration_ms: start.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        };
        info!("Pipeline finished in {} ms", stats.duration_ms);

        PipelineOutcome {
            profile,
            rules,
            violations: evaluation.violations,
            skipped: evaluation.skipped,
            cleaned: remediation.cleaned,
            kpi_summary,
            column_kpis,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellValue, NumericCoercion};
    use pretty_assertions::assert_eq;

    fn raw(id: &str, column: &str, rule_type: &str, param1: Option<&str>) -> RawRule {
        RawRule {
            rule_id: Some(id.to_string()),
            column_name: Some(column.to_string()),
            rule_type: Some(rule_type.to_string()),
            param1: param1.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_pipeline_stats() {
        let dataset = Dataset::from_columns(vec![
            ("age", vec![CellValue::Int(-1), CellValue::Int(30)]),
            ("code", vec![CellValue::from("x"), CellValue::from("y")]),
        ])
        .unwrap();
        let rules = vec![
            raw("r1", "age", "min", Some("0")),
            raw("r2", "code", "unique", None),
            raw("r3", "nope", "not_null", None),
        ];

        let outcome = QualityPipeline::new().run(&dataset, &rules);

        assert_eq!(outcome.stats.rows, 2);
        assert_eq!(outcome.stats.columns, 2);
        assert_eq!(outcome.stats.rules_total, 3);
        assert_eq!(outcome.stats.rules_evaluated, 1);
        assert_eq!(outcome.stats.rules_skipped, 2);
        assert_eq!(outcome.stats.violations, 1);
        assert_eq!(outcome.stats.cells_changed, 1);
        assert_eq!(outcome.profile.len(), 2);
        assert_eq!(outcome.column_kpis[0].violation_count, 1);
        assert_eq!(outcome.cleaned.get(0, "age"), Some(&CellValue::Int(0)));
    }

    #[test]
    fn test_pipeline_with_whole_column_coercion() {
        let dataset = Dataset::from_columns(vec![(
            "amount",
            vec![CellValue::from("n/a"), CellValue::from("250")],
        )])
        .unwrap();
        let options = PipelineOptions {
            remediation: RemediationOptions::new().with_coercion(NumericCoercion::WholeColumn),
        };

        let outcome = QualityPipeline::with_options(options)
            .run(&dataset, &[raw("r1", "amount", "MAX", Some("100"))]);

        assert_eq!(
            outcome.cleaned.column("amount").unwrap(),
            &[CellValue::Null, CellValue::Int(100)]
        );
        assert_eq!(outcome.kpi_summary.overall_completeness_after, 0.5);
    }
}
