//! LLM: outbound text generation for the math solver.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` enum dispatches
//! to Gemini (default) or Anthropic based on `LLM_PROVIDER`; callers only
//! see the provider-neutral [`TextGenerator`] trait.

pub mod anthropic;
pub mod config;
pub mod gemini;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::{LlmError, Sampling, TextGenerator};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Gemini or Anthropic.
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
    max_tokens: u32,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Gemini => {
                LlmProvider::Gemini(gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
            LlmProviderKind::Anthropic => LlmProvider::Anthropic(anthropic::AnthropicClient::new(
                config.api_key,
                config.base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model: config.model, max_tokens: config.max_tokens })
    }

    /// Return the configured model name (e.g. `"gemini-3-pro-preview"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, sampling: &Sampling) -> Result<String, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.generate(&self.model, prompt, sampling).await,
            LlmProvider::Anthropic(c) => c.generate(&self.model, self.max_tokens, prompt, sampling).await,
        }
    }
}
