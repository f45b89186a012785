//! Insight generation with local failure recovery.

use std::sync::Arc;

use crate::summary::DatasetSummary;

use super::prompts;
use super::provider::LlmProvider;

/// Turns a dataset summary into narrative insight text.
///
/// The provider call is the only stage of the pipeline with externally
/// variable latency; its failures are absorbed here. `generate` is
/// infallible by contract so report rendering is never blocked by model
/// unavailability.
pub struct InsightGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl InsightGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Generate insight text for a summary.
    ///
    /// Builds the deterministic prompt, performs a single completion call
    /// and trims the response. Provider errors and empty responses become
    /// a fallback string naming the failure; the underlying error never
    /// escapes this boundary.
    pub fn generate(&self, summary: &DatasetSummary) -> String {
        let prompt = prompts::insight_prompt(summary);

        match self.provider.complete(&prompt) {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    fallback("empty response from provider")
                } else {
                    trimmed.to_string()
                }
            }
            Err(e) => fallback(&e.to_string()),
        }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

fn fallback(reason: &str) -> String {
    format!("Failed to generate insights: {}", reason)
}
