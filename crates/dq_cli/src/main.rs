mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dq")]
#[command(version, about = "Data Quality Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate rules against a dataset, remediate it and write the outputs
    Run {
        /// Path to the dataset (CSV with a header row)
        data: PathBuf,

        /// Path to the rule table (CSV, YAML, TOML or JSON)
        rules: PathBuf,

        /// Output directory (defaults to DQ_OUTPUT_DIR or "out")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Do not request a narrative even if the service is configured
        #[arg(long)]
        no_narrative: bool,

        /// Coerce whole MIN/MAX columns to numbers before clipping
        #[arg(long)]
        whole_column_coercion: bool,
    },

    /// Check a rule table without evaluating data
    Check {
        /// Path to the rule table (CSV, YAML, TOML or JSON)
        rules: PathBuf,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Profile the columns of a dataset
    Profile {
        /// Path to the dataset (CSV with a header row)
        data: PathBuf,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Run {
            data,
            rules,
            output,
            format,
            no_narrative,
            whole_column_coercion,
        } => {
            commands::run::execute(commands::run::RunArgs {
                data: &data,
                rules: &rules,
                output_dir: output.as_deref(),
                format: &format,
                no_narrative,
                whole_column_coercion,
            })
            .await
        }

        Commands::Check { rules, format } => commands::check::execute(&rules, &format),

        Commands::Profile { data, format } => commands::profile::execute(&data, &format),
    }
}
