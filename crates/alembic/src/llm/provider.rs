//! LLM provider trait and configuration.

use crate::error::Result;

/// Configuration for LLM providers.
///
/// Injected at provider construction so components stay testable with a
/// fake capability; nothing reads ambient process state after that point.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (provider-specific).
    pub model: String,

    /// Maximum tokens in the response. Bounded so downstream report
    /// layout stays predictable.
    pub max_tokens: usize,

    /// Temperature for generation. Defaults to the lowest-variance
    /// setting: identical summaries should yield reproducible reports.
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 600,
            temperature: 0.0,
        }
    }
}

/// Trait for text-generation capabilities.
///
/// Implementations must be thread-safe (Send + Sync). Callers perform at
/// most one `complete` call per pipeline run; providers are expected to
/// bound latency with a client timeout rather than retry internally.
pub trait LlmProvider: Send + Sync {
    /// Request a completion for the given prompt.
    ///
    /// Returns the raw response text, or an error when the capability is
    /// unreachable or returns no usable candidate.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
