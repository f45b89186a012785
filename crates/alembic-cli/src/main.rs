//! Alembic CLI - automated insight reports for tabular datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            file,
            output,
            llm,
            model,
            max_tokens,
        } => commands::report::run(file, output, llm, model, max_tokens, cli.verbose),

        Commands::Summarize { file, json } => commands::summarize::run(file, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
