use anyhow::{Context, Result};
use dq_engine::{NumericCoercion, PipelineOptions, QualityPipeline, RemediationOptions};
use dq_io::{persist_outputs, read_csv_dataset};
use dq_narrative::NarrativeClient;
use dq_parser::parse_file;
use std::path::Path;
use tracing::info;

use crate::config::PipelineConfig;
use crate::output;

/// File name of the narrative, written only when one was generated.
pub const NARRATIVE_FILE: &str = "dq_narrative.md";

pub struct RunArgs<'a> {
    pub data: &'a Path,
    pub rules: &'a Path,
    pub output_dir: Option<&'a Path>,
    pub format: &'a str,
    pub no_narrative: bool,
    pub whole_column_coercion: bool,
}

pub async fn execute(args: RunArgs<'_>) -> Result<()> {
    let config = PipelineConfig::from_env();
    info!("Running data quality pipeline");
    info!("Dataset: {}", args.data.display());
    info!("Rules: {}", args.rules.display());

    let dataset = read_csv_dataset(args.data)
        .with_context(|| format!("Failed to read dataset: {}", args.data.display()))?;
    let raw_rules = parse_file(args.rules)
        .with_context(|| format!("Failed to parse rule file: {}", args.rules.display()))?;

    let coercion = if args.whole_column_coercion {
        NumericCoercion::WholeColumn
    } else {
        NumericCoercion::FlaggedRows
    };
    let options = PipelineOptions {
        remediation: RemediationOptions::new().with_coercion(coercion),
    };
    let outcome = QualityPipeline::with_options(options).run(&dataset, &raw_rules);

    let output_dir = args.output_dir.unwrap_or(config.output_dir.as_path());
    let paths = persist_outputs(output_dir, &outcome)
        .with_context(|| format!("Failed to write outputs to: {}", output_dir.display()))?;

    let narrative = if args.no_narrative {
        None
    } else {
        NarrativeClient::from_config(config.narrative_config())
            .context("Failed to create narrative client")?
            .generate(&outcome.kpi_summary, &outcome.column_kpis)
            .await
    };

    if let Some(text) = &narrative {
        let path = output_dir.join(NARRATIVE_FILE);
        std::fs::write(&path, text)
            .with_context(|| format!("Failed to write narrative: {}", path.display()))?;
    } else if !args.no_narrative && config.ai_sdk_base_url.is_some() {
        output::print_warning("Narrative service did not return a summary");
    }

    output::print_run_report(&outcome, &paths, narrative.as_deref(), args.format)
}
