//! Anthropic API format handler
//!
//! Single-turn requests against the Messages API.

use serde_json::Value;

use super::{response, FormatHandler, RequestOptions};
use crate::ai::client::config::Credentials;

/// Anthropic format handler
pub struct AnthropicFormat {
    endpoint: String,
}

impl AnthropicFormat {
    pub fn new() -> Self {
        Self {
            endpoint: "/v1/messages".to_string(),
        }
    }
}

impl Default for AnthropicFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatHandler for AnthropicFormat {
    /// Temperature is left at the provider default
    fn build_request_body(&self, model: &str, prompt: &str, options: &RequestOptions) -> Value {
        serde_json::json!({
            "model": model,
            "max_tokens": options.max_tokens,
            "messages": [{
                "role": "user",
                "content": prompt
            }]
        })
    }

    fn endpoint_url(&self, base_url: &str, _credentials: &Credentials) -> Option<String> {
        Some(format!("{}{}", base_url, self.endpoint))
    }

    fn extract_text<'a>(&self, response: &'a Value) -> Option<&'a str> {
        response::anthropic_text(response)
    }
}
