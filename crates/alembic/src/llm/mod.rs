//! LLM provider integration for narrative insight generation.
//!
//! One pluggable capability: given a prompt built from the dataset
//! summary, return plain text. Provider failures never propagate past
//! [`InsightGenerator`] — the pipeline continues with fallback text.
//!
//! # Supported Providers
//!
//! - **OpenAI** - GPT models via API (requires `OPENAI_API_KEY`)
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **Ollama** - Local models, no API key needed (requires Ollama installed)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use alembic::llm::{InsightGenerator, OpenAiProvider};
//!
//! let provider = OpenAiProvider::from_env().unwrap();
//! let generator = InsightGenerator::new(Arc::new(provider));
//! ```

mod anthropic;
mod insights;
mod mock;
mod ollama;
mod openai;
mod prompts;
mod provider;

pub use anthropic::AnthropicProvider;
pub use insights::InsightGenerator;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use prompts::insight_prompt;
pub use provider::{LlmConfig, LlmProvider};
