//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Alembic: automated insight reports for tabular datasets
#[derive(Parser)]
#[command(name = "alembic")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and write report documents
    Report {
        /// Path to the data file (.csv, .sql, .db, .sqlite)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for reports (default: generated_reports)
        #[arg(short, long, default_value = "generated_reports")]
        output: PathBuf,

        /// LLM provider for narrative insights
        #[arg(long, default_value = "none")]
        llm: LlmProviderChoice,

        /// Model to use (provider-specific, e.g., "gpt-4o-mini", "llama3.2")
        #[arg(long)]
        model: Option<String>,

        /// Maximum tokens in the insight response
        #[arg(long, default_value = "600")]
        max_tokens: usize,
    },

    /// Compute and print the dataset summary without rendering reports
    Summarize {
        /// Path to the data file (.csv, .sql, .db, .sqlite)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// LLM provider choice for insight generation
#[derive(Clone, Debug, Default)]
pub enum LlmProviderChoice {
    /// No LLM - reports carry a placeholder instead of insights
    #[default]
    None,
    /// OpenAI GPT API (requires OPENAI_API_KEY)
    OpenAi,
    /// Anthropic Claude API (requires ANTHROPIC_API_KEY)
    Anthropic,
    /// Ollama local models (requires Ollama running)
    Ollama,
    /// Mock provider for testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "openai" | "gpt" => Ok(LlmProviderChoice::OpenAi),
            "anthropic" | "claude" => Ok(LlmProviderChoice::Anthropic),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, openai, anthropic, ollama, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::OpenAi => write!(f, "openai"),
            LlmProviderChoice::Anthropic => write!(f, "anthropic"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}
