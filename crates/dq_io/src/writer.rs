//! Output writers.

use crate::{Result, dataset_to_record_batch};
use arrow_csv::WriterBuilder;
use dq_engine::{
    Dataset, KpiSummary, PipelineOutcome, PipelineStats, SkippedRule, kpi_table, profile_table,
    violations_table,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the remediated dataset.
pub const CLEANED_FILE: &str = "cleaned_data.csv";
/// File name of the violations table.
pub const VIOLATIONS_FILE: &str = "dq_violations.csv";
/// File name of the profile table.
pub const PROFILE_FILE: &str = "dq_profile.csv";
/// File name of the column KPI table.
pub const KPIS_FILE: &str = "dq_kpis.csv";
/// File name of the KPI summary document.
pub const KPI_SUMMARY_FILE: &str = "dq_kpi_summary.json";

/// Locations of the files written by [`persist_outputs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub cleaned: PathBuf,
    pub violations: PathBuf,
    pub profile: PathBuf,
    pub kpis: PathBuf,
    pub kpi_summary: PathBuf,
}

/// The KPI summary document.
#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    #[serde(flatten)]
    kpi: &'a KpiSummary,
    stats: &'a PipelineStats,
    skipped_rules: &'a [SkippedRule],
}

/// Creates a directory and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        debug!("Creating directory {}", path.display());
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes a dataset as CSV with a header row. Missing cells are empty.
pub fn write_dataset_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let batch = dataset_to_record_batch(dataset)?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .build(create_file(path)?);
    writer.write(&batch)?;
    writer.into_inner().flush()?;
    debug!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Writes a value as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let mut file = create_file(path)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(())
}

/// Writes every pipeline output into `dir`.
pub fn persist_outputs(dir: &Path, outcome: &PipelineOutcome) -> Result<OutputPaths> {
    ensure_dir(dir)?;
    let paths = OutputPaths {
        cleaned: dir.join(CLEANED_FILE),
        violations: dir.join(VIOLATIONS_FILE),
        profile: dir.join(PROFILE_FILE),
        kpis: dir.join(KPIS_FILE),
        kpi_summary: dir.join(KPI_SUMMARY_FILE),
    };

    write_dataset_csv(&outcome.cleaned, &paths.cleaned)?;
    write_dataset_csv(&violations_table(&outcome.violations)?, &paths.violations)?;
    write_dataset_csv(&profile_table(&outcome.profile)?, &paths.profile)?;
    write_dataset_csv(&kpi_table(&outcome.column_kpis)?, &paths.kpis)?;
    write_json(
        &SummaryDocument {
            kpi: &outcome.kpi_summary,
            stats: &outcome.stats,
            skipped_rules: &outcome.skipped,
        },
        &paths.kpi_summary,
    )?;

    info!("Persisted outputs to {}", dir.display());
    Ok(paths)
}
