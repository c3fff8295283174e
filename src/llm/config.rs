//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Gemini,
    Anthropic,
}

impl LlmProviderKind {
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-3-pro-preview",
            Self::Anthropic => "claude-sonnet-4-5-20250929",
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_BASE_URL,
            Self::Anthropic => DEFAULT_ANTHROPIC_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Output cap; only the Anthropic API requires one.
    pub max_tokens: u32,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// - `LLM_PROVIDER`: `gemini` (default) or `anthropic`
    /// - `LLM_API_KEY_ENV`: names the env var containing the key (default `API_KEY`)
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_BASE_URL`: provider default when absent
    /// - `LLM_MAX_TOKENS`: default 2048
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown provider or a missing API key.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown provider or a missing API key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let provider = parse_provider(lookup("LLM_PROVIDER").as_deref())?;

        let key_var = lookup("LLM_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = lookup(&key_var)
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingApiKey { var: key_var })?;

        let model = lookup("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_string());
        let base_url = normalize_base_url(
            lookup("LLM_BASE_URL").as_deref().unwrap_or(provider.default_base_url()),
        );
        let max_tokens = parse_or(&lookup, "LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS);
        let timeouts = LlmTimeouts {
            request_secs: parse_or(&lookup, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, api_key, model, base_url, max_tokens, timeouts })
    }

    /// Point the client at a different API base URL (for example the one a
    /// user saved in settings). Blank input keeps the current URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        if !base_url.trim().is_empty() {
            self.base_url = normalize_base_url(base_url);
        }
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_provider(raw: Option<&str>) -> Result<LlmProviderKind, LlmError> {
    match raw.unwrap_or("gemini") {
        "gemini" => Ok(LlmProviderKind::Gemini),
        "anthropic" => Ok(LlmProviderKind::Anthropic),
        other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
