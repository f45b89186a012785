//! Mock LLM provider for testing.

use crate::error::{AlembicError, Result};

use super::provider::{LlmConfig, LlmProvider};

/// Mock LLM provider that returns predictable responses for testing.
pub struct MockProvider {
    config: LlmConfig,
    fail_with: Option<String>,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            config: LlmConfig {
                model: "mock".to_string(),
                ..LlmConfig::default()
            },
            fail_with: None,
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self {
            config,
            fail_with: None,
        }
    }

    /// Create a mock that always fails, for exercising fallback paths.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::new()
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn complete(&self, prompt: &str) -> Result<String> {
        if let Some(ref reason) = self.fail_with {
            return Err(AlembicError::Config(reason.clone()));
        }

        // Echo enough of the request to make assertions meaningful
        Ok(format!(
            "Executive summary: mock analysis of a dataset summary \
             ({} prompt characters).\n\n\
             Top insights:\n\
             - This narrative was produced by the mock provider.\n\
             - It is deterministic for identical prompts.\n\n\
             Anomalies: none detected by the mock.\n\n\
             Suggested KPIs: track row counts over time.",
            prompt.len()
        ))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
