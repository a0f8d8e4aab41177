use anyhow::Result;
use colored::*;
use dq_core::Rule;
use dq_engine::{ColumnProfile, PipelineOutcome};
use dq_io::OutputPaths;
use serde_json::json;

use crate::commands::check::RuleIssue;

pub fn print_run_report(
    outcome: &PipelineOutcome,
    paths: &OutputPaths,
    narrative: Option<&str>,
    format: &str,
) -> Result<()> {
    match format {
        "json" => print_json_run_report(outcome, paths, narrative),
        _ => {
            print_text_run_report(outcome, paths, narrative);
            Ok(())
        }
    }
}

fn print_text_run_report(outcome: &PipelineOutcome, paths: &OutputPaths, narrative: Option<&str>) {
    let stats = &outcome.stats;
    let kpi = &outcome.kpi_summary;

    println!("\n{}", "═".repeat(60));
    println!("{}", "  DATA QUALITY REPORT".bold());
    println!("{}", "═".repeat(60));

    if outcome.violations.is_empty() {
        println!("\n{} {}", "✓".green().bold(), "No violations found".green().bold());
    } else {
        println!(
            "\n{} {}",
            "!".yellow().bold(),
            format!("{} violations found", outcome.violations.len())
                .yellow()
                .bold()
        );
    }

    println!("\n{}", "Summary:".bold());
    println!("  Rows:                 {}", stats.rows);
    println!("  Columns:              {}", stats.columns);
    println!(
        "  Rules evaluated:      {} of {}",
        stats.rules_evaluated, stats.rules_total
    );
    println!("  Violations:           {}", kpi.total_violations);
    println!("  Cells remediated:     {}", stats.cells_changed);
    println!(
        "  Completeness:         {:.2}% -> {:.2}%",
        kpi.overall_completeness_before * 100.0,
        kpi.overall_completeness_after * 100.0
    );

    if !outcome.skipped.is_empty() {
        println!("\n{}", "Skipped rules:".yellow().bold());
        for skipped in &outcome.skipped {
            println!(
                "  - {}: {}",
                skipped.rule_id,
                skipped.reason.to_string().yellow()
            );
        }
    }

    let flagged: Vec<_> = outcome
        .column_kpis
        .iter()
        .filter(|k| k.violation_count > 0 || k.null_count_before > 0)
        .collect();
    if !flagged.is_empty() {
        println!("\n{}", "Columns:".bold());
        for column in flagged {
            println!(
                "  {:<20} violations: {:<5} nulls: {} -> {}",
                column.column_name,
                column.violation_count,
                column.null_count_before,
                column.null_count_after
            );
        }
    }

    println!("\n{}", "Outputs:".bold());
    for path in [
        &paths.cleaned,
        &paths.violations,
        &paths.profile,
        &paths.kpis,
        &paths.kpi_summary,
    ] {
        println!("  {}", path.display());
    }

    if let Some(text) = narrative {
        println!("\n{}", "Narrative:".bold());
        println!("{}", text);
    }

    println!("{}", "═".repeat(60));
}

fn print_json_run_report(
    outcome: &PipelineOutcome,
    paths: &OutputPaths,
    narrative: Option<&str>,
) -> Result<()> {
    let output = json!({
        "stats": outcome.stats,
        "kpi_summary": outcome.kpi_summary,
        "column_kpis": outcome.column_kpis,
        "skipped_rules": outcome.skipped,
        "outputs": paths,
        "narrative": narrative,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_check_report(rules: &[Rule], issues: &[RuleIssue], format: &str) -> Result<()> {
    if format == "json" {
        let output = json!({
            "valid": issues.is_empty(),
            "rule_count": rules.len(),
            "rules": rules,
            "issues": issues.iter().map(|i| json!({
                "rule_id": i.rule_id,
                "problem": i.problem,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\nRule Table Summary:");
    println!("  Rules:   {}", rules.len());
    println!("  Usable:  {}", rules.len() - issues.len());

    println!();
    for rule in rules {
        println!(
            "  {:<16} {:<10} {:<16} {}",
            rule.rule_id,
            rule.rule_type,
            rule.column().unwrap_or("-"),
            rule.param1().unwrap_or("")
        );
    }

    if issues.is_empty() {
        println!();
        print_success("All rules can be evaluated");
    } else {
        println!("\n{}", "Issues:".yellow().bold());
        for (i, issue) in issues.iter().enumerate() {
            println!(
                "  {}. {}: {}",
                i + 1,
                issue.rule_id,
                issue.problem.yellow()
            );
        }
    }
    Ok(())
}

pub fn print_profile(profiles: &[ColumnProfile], format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(profiles)?);
        return Ok(());
    }

    println!(
        "\n{:<20} {:<8} {:>6} {:>8} {:>6} {:>8} {:>8}",
        "column".bold(),
        "dtype".bold(),
        "rows".bold(),
        "non_null".bold(),
        "nulls".bold(),
        "null_%".bold(),
        "distinct".bold()
    );
    for p in profiles {
        println!(
            "{:<20} {:<8} {:>6} {:>8} {:>6} {:>8.2} {:>8}",
            p.column_name,
            p.dtype,
            p.row_count,
            p.non_null_count,
            p.null_count,
            p.null_percent,
            p.distinct_count
        );
    }
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "!".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
