//! Summarize command - print the dataset summary without rendering.

use std::path::PathBuf;

use alembic::Alembic;
use colored::Colorize;

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let alembic = Alembic::new();
    let (loaded, summary) = alembic.summarize_file(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Summary of".cyan().bold(),
        loaded.metadata.file.white()
    );
    println!(
        "  {} rows, {} columns ({}, {} bytes)",
        summary.row_count,
        summary.columns.len(),
        loaded.metadata.kind,
        loaded.metadata.size_bytes
    );
    if verbose {
        println!("  {}", loaded.metadata.hash);
    }

    println!();
    println!("{}", "Missing values:".yellow().bold());
    for (name, count) in &summary.missing_values {
        println!("  {:24} {}", name, count);
    }

    if !summary.numeric_summary.is_empty() {
        println!();
        println!("{}", "Numeric columns:".yellow().bold());
        for (name, stats) in &summary.numeric_summary {
            println!(
                "  {:24} count={} mean={:.3} std={} min={} median={} max={}",
                name,
                stats.count,
                stats.mean,
                stats
                    .std
                    .map(|s| format!("{:.3}", s))
                    .unwrap_or_else(|| "n/a".to_string()),
                stats.min,
                stats.median,
                stats.max
            );
        }
    }

    if !loaded.skipped_statements.is_empty() {
        println!();
        println!(
            "{} {} statement(s) skipped during replay",
            "Note:".yellow().bold(),
            loaded.skipped_statements.len()
        );
    }

    Ok(())
}
