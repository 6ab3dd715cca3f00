//! Generate command handler

use anyhow::{Context, Result};
use colored::*;
use is_terminal::IsTerminal;
use std::fs;
use std::path::{Path, PathBuf};

use super::GenerateCommands;
use crate::config::Config;
use crate::reports::{CsvReport, Registry, XlsxSource, generate_reports};

/// Run one generation pass and write every produced report
pub fn handle_generate_command(args: GenerateCommands) -> Result<()> {
    if args.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if !args.file.exists() {
        anyhow::bail!("Workbook does not exist: {}", args.file.display());
    }

    let config = Config::load(args.config.as_deref())?;
    let registry = config.registry();
    let output_dir = args.output_dir.unwrap_or_else(|| config.reports_dir.clone());

    println!("Reading workbook: {}", args.file.display().to_string().cyan());

    let mut source = XlsxSource::open(&args.file)?;
    let prefix = source.file_stem();
    let reports = generate_reports(&mut source, Some(&prefix), &registry)
        .with_context(|| format!("Failed to generate reports from {}", args.file.display()))?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create reports directory: {}", output_dir.display()))?;

    let written = write_reports(&reports, &output_dir)?;
    print_summary(&registry, &reports, &written);

    Ok(())
}

/// Save produced reports, keeping one entry per report schema
fn write_reports(reports: &[Option<CsvReport>], output_dir: &Path) -> Result<Vec<Option<PathBuf>>> {
    reports
        .iter()
        .map(|report| report.as_ref().map(|r| r.save(output_dir)).transpose())
        .collect()
}

fn print_summary(registry: &Registry, reports: &[Option<CsvReport>], written: &[Option<PathBuf>]) {
    println!();
    for ((schema, report), path) in registry.reports().iter().zip(reports).zip(written) {
        match (report, path) {
            (Some(report), Some(path)) => println!(
                "  {} {} ({} rows) -> {}",
                "✓".bright_green(),
                schema.description.bold(),
                report.row_count(),
                path.display().to_string().cyan()
            ),
            _ => println!(
                "  {} {} {}",
                "-".dimmed(),
                schema.description,
                "(no matching orders)".dimmed()
            ),
        }
    }

    let count = written.iter().flatten().count();
    println!();
    println!(
        "Generated {} of {} reports",
        count.to_string().bright_green().bold(),
        reports.len()
    );
}
