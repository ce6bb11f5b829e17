//! OpenAI API format handler
//!
//! Handles the chat/completions format, both on api.openai.com and on
//! Azure OpenAI deployments.

use serde_json::Value;

use super::{response, FormatHandler, RequestOptions};
use crate::ai::client::config::Credentials;
use crate::ai::providers::ProviderId;
use crate::constants;

/// OpenAI format handler
pub struct OpenAIFormat {
    provider: ProviderId,
    endpoint: String,
}

impl OpenAIFormat {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            endpoint: "/v1/chat/completions".to_string(),
        }
    }

    fn is_azure(&self) -> bool {
        matches!(self.provider, ProviderId::AzureOpenAI)
    }
}

impl FormatHandler for OpenAIFormat {
    fn build_request_body(&self, model: &str, prompt: &str, options: &RequestOptions) -> Value {
        let mut body = serde_json::json!({
            "messages": [{
                "role": "user",
                "content": prompt
            }],
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
        });

        // Azure selects the model through the deployment path
        if !self.is_azure() {
            body["model"] = serde_json::json!(model);
        }

        body
    }

    fn endpoint_url(&self, base_url: &str, credentials: &Credentials) -> Option<String> {
        if !self.is_azure() {
            return Some(format!("{}{}", base_url, self.endpoint));
        }

        // Azure's base is the caller's resource endpoint
        if base_url.is_empty() {
            return None;
        }
        let deployment = credentials
            .azure_deployment_name
            .as_deref()
            .filter(|d| !d.is_empty())?;

        Some(format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            base_url,
            deployment,
            constants::ai::AZURE_API_VERSION
        ))
    }

    fn extract_text<'a>(&self, response: &'a Value) -> Option<&'a str> {
        response::openai_text(response)
    }
}
