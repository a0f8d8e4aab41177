use anyhow::{Context, Result};
use dq_engine::profile_dataset;
use dq_io::read_csv_dataset;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(data_path: &Path, format: &str) -> Result<()> {
    info!("Profiling dataset: {}", data_path.display());

    let dataset = read_csv_dataset(data_path)
        .with_context(|| format!("Failed to read dataset: {}", data_path.display()))?;

    if format != "json" {
        output::print_info(&format!(
            "Dataset loaded: {} rows, {} columns",
            dataset.len(),
            dataset.width()
        ));
    }

    output::print_profile(&profile_dataset(&dataset), format)
}
