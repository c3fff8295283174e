//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/messages`. Pure parsing in `parse_response` for
//! testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::types::{LlmError, Sampling};

const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-200 status, or a response
    /// without text.
    pub async fn generate(
        &self,
        model: &str,
        max_tokens: u32,
        prompt: &str,
        sampling: &Sampling,
    ) -> Result<String, LlmError> {
        let body = build_request(model, max_tokens, prompt, sampling);

        let response = self
            .http
            .post(format!("{}/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
    temperature: f32,
    // Newer models reject `top_p` together with `temperature`.
    top_k: u32,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn build_request<'a>(model: &'a str, max_tokens: u32, prompt: &'a str, sampling: &Sampling) -> ApiRequest<'a> {
    ApiRequest {
        model,
        max_tokens,
        messages: [UserMessage { role: "user", content: prompt }],
        temperature: sampling.temperature,
        top_k: sampling.top_k,
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Unknown,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<String, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text: String = api
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Unknown => None,
        })
        .collect();

    if text.is_empty() {
        return Err(LlmError::EmptyResponse(api.stop_reason.unwrap_or_else(|| "no text blocks".to_string())));
    }
    Ok(text)
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
