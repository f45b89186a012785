//! Report command - run the full pipeline and write report documents.

use std::path::PathBuf;

use alembic::{
    Alembic, AnthropicProvider, LlmConfig, MockProvider, OllamaProvider, OpenAiProvider,
};
use colored::Colorize;

use crate::cli::LlmProviderChoice;

pub fn run(
    file: PathBuf,
    output: PathBuf,
    llm: LlmProviderChoice,
    model: Option<String>,
    max_tokens: usize,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Processing".cyan().bold(),
        file.display().to_string().white()
    );

    let alembic = build_pipeline(llm, model, max_tokens)?;
    let report = alembic.run(&file, &output)?;

    println!(
        "Loaded {} rows, {} columns ({})",
        report.summary.row_count.to_string().white().bold(),
        report.summary.columns.len().to_string().white().bold(),
        report.source.kind
    );

    if let Some(ref name) = report.table_name {
        println!("Selected table: {}", name.white());
    }

    if !report.skipped_statements.is_empty() {
        println!(
            "{} {} statement(s) skipped during replay",
            "Note:".yellow().bold(),
            report.skipped_statements.len()
        );
        if verbose {
            for skipped in &report.skipped_statements {
                let preview: String = skipped.statement.chars().take(60).collect();
                println!("  [{}] {} -- {}", skipped.index, preview, skipped.error);
            }
        }
    }

    if verbose {
        println!();
        println!("{}", "Numeric columns:".yellow().bold());
        for (name, stats) in &report.summary.numeric_summary {
            println!(
                "  {:20} count={} mean={:.3} min={} max={}",
                name, stats.count, stats.mean, stats.min, stats.max
            );
        }
        println!();
    }

    println!();
    println!("{}", "Insights:".yellow().bold());
    println!("{}", report.insights);

    println!();
    for path in &report.report_paths {
        println!(
            "{} {}",
            "Saved".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn build_pipeline(
    llm: LlmProviderChoice,
    model: Option<String>,
    max_tokens: usize,
) -> Result<Alembic, Box<dyn std::error::Error>> {
    let alembic = Alembic::new();

    let config = |default_model: &str| LlmConfig {
        model: model.clone().unwrap_or_else(|| default_model.to_string()),
        max_tokens,
        ..LlmConfig::default()
    };

    Ok(match llm {
        LlmProviderChoice::None => alembic,
        LlmProviderChoice::OpenAi => {
            let api_key = std::env::var("OPENAI_API_KEY")
                .map_err(|_| "OPENAI_API_KEY environment variable not set")?;
            alembic.with_llm(OpenAiProvider::with_config(api_key, config("gpt-4o-mini"))?)
        }
        LlmProviderChoice::Anthropic => {
            let api_key = std::env::var("ANTHROPIC_API_KEY")
                .map_err(|_| "ANTHROPIC_API_KEY environment variable not set")?;
            alembic.with_llm(AnthropicProvider::with_config(
                api_key,
                config("claude-sonnet-4-20250514"),
            )?)
        }
        LlmProviderChoice::Ollama => {
            alembic.with_llm(OllamaProvider::with_config(config("llama3.2"))?)
        }
        LlmProviderChoice::Mock => alembic.with_llm(MockProvider::new()),
    })
}
