//! API Format handling
//!
//! Abstracts the differences between the OpenAI, Azure OpenAI, Anthropic, and
//! Google wire formats. Each format handler knows its endpoint, how to shape a
//! single-prompt request body, and where the first text completion lives in
//! the response.

pub mod anthropic;
pub mod google;
pub mod openai;
pub mod response;

use serde_json::Value;

use crate::ai::client::config::Credentials;
use crate::ai::providers::ProviderId;

/// Trait for handling different API formats
pub trait FormatHandler: Send + Sync {
    /// Build the complete request body with `prompt` as the sole user message
    fn build_request_body(&self, model: &str, prompt: &str, options: &RequestOptions) -> Value;

    /// Full endpoint URL for this format
    ///
    /// Returns `None` when the credentials lack data the endpoint needs
    /// (an Azure call without endpoint or deployment).
    fn endpoint_url(&self, base_url: &str, credentials: &Credentials) -> Option<String>;

    /// Locate the first text completion in a response payload
    fn extract_text<'a>(&self, response: &'a Value) -> Option<&'a str>;
}

/// Options for building API requests
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    pub max_tokens: usize,
    pub temperature: f64,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            max_tokens: crate::constants::ai::MAX_OUTPUT_TOKENS,
            temperature: crate::constants::ai::TEMPERATURE,
        }
    }
}

/// Select the format handler for a provider
pub fn get_format_handler(provider: ProviderId) -> Box<dyn FormatHandler> {
    match provider {
        ProviderId::OpenAI | ProviderId::AzureOpenAI => {
            Box::new(openai::OpenAIFormat::new(provider))
        }
        ProviderId::Anthropic => Box::new(anthropic::AnthropicFormat::new()),
        ProviderId::Google => Box::new(google::GoogleFormat::new()),
    }
}
