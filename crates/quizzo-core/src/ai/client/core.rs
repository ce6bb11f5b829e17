//! Core AI Client
//!
//! The main AiClient struct that handles API communication with every provider.
//! Holds only immutable transport state; credentials arrive with each call.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use super::config::{ClientConfig, Credentials};
use crate::ai::format::response::{error_message, extract_completion_text};
use crate::ai::format::{get_format_handler, RequestOptions};
use crate::ai::providers::{get_provider, AuthHeader, ProviderConfig, ProviderId};
use crate::constants;
use crate::error::QuizError;

/// Anything that can turn a prompt into raw completion text
///
/// The quiz generators depend on this rather than on [`AiClient`] directly.
#[async_trait]
pub trait CompletionDispatcher: Send + Sync {
    /// Send `prompt` as the sole user message and return the first text completion
    async fn dispatch(
        &self,
        provider: ProviderId,
        credentials: &Credentials,
        prompt: &str,
    ) -> Result<String, QuizError>;
}

/// AI API client supporting multiple providers
pub struct AiClient {
    http: Client,
    config: ClientConfig,
}

impl AiClient {
    /// Create the HTTP client with the configured timeouts
    fn create_http_client(config: &ClientConfig) -> Client {
        Client::builder()
            .user_agent(constants::http::USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build HTTP client: {}. Using default client.", e);
                Client::new()
            })
    }

    /// Create a new client
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Self::create_http_client(&config),
            config,
        }
    }

    /// Build a request with proper authentication headers
    pub(crate) fn build_request(
        &self,
        url: &str,
        provider: &ProviderConfig,
        api_key: &str,
    ) -> reqwest::RequestBuilder {
        let mut request = self.http.post(url);

        request = match provider.auth_header {
            AuthHeader::Bearer => request.header("authorization", format!("Bearer {}", api_key)),
            AuthHeader::XApiKey => request.header("x-api-key", api_key),
            AuthHeader::ApiKey => request.header("api-key", api_key),
        };

        for (name, value) in &provider.custom_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request.header("content-type", "application/json")
    }

    /// Map a transport error, calling out timeouts explicitly
    fn transport_error(&self, provider: ProviderId, err: reqwest::Error) -> QuizError {
        let message = if err.is_timeout() {
            format!("request timed out after {:?}", self.config.timeout)
        } else {
            err.to_string()
        };
        error!("{} transport error: {}", provider, message);
        QuizError::request(provider, message)
    }

    /// Handle an error response and return a classified error
    async fn handle_error_response(
        &self,
        provider: ProviderId,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, QuizError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("API error response: {} - {}", status, error_text);

        let mut message = error_message(&error_text);
        if message.is_empty() {
            message = status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string();
        }

        Err(QuizError::ProviderRequest {
            provider,
            status: Some(status.as_u16()),
            message: format!("HTTP {}: {}", status.as_u16(), message),
        })
    }
}

#[async_trait]
impl CompletionDispatcher for AiClient {
    async fn dispatch(
        &self,
        provider: ProviderId,
        credentials: &Credentials,
        prompt: &str,
    ) -> Result<String, QuizError> {
        let provider_config = get_provider(provider)
            .ok_or_else(|| QuizError::request(provider, "no configuration for provider"))?;
        let handler = get_format_handler(provider);

        let url = handler
            .endpoint_url(self.config.base_url_for(provider_config, credentials), credentials)
            .ok_or_else(|| {
                QuizError::request(
                    provider,
                    "Azure endpoint and deployment name are required",
                )
            })?;

        let options = RequestOptions {
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let body = handler.build_request_body(&credentials.model_name, prompt, &options);

        info!("Dispatching {} request for model {}", provider, credentials.model_name);
        debug!(url = %url, body = %body, "{} request (api key redacted)", provider);

        let response = self
            .build_request(&url, provider_config, &credentials.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(provider, e))?;
        let response = self.handle_error_response(provider, response).await?;

        let raw = response
            .text()
            .await
            .map_err(|e| self.transport_error(provider, e))?;
        let json: Value = serde_json::from_str(&raw)
            .map_err(|e| QuizError::shape(provider, format!("response is not JSON: {}", e)))?;

        let text = extract_completion_text(provider, handler.as_ref(), &json)
            .ok_or_else(|| {
                error!("{} response without text completion: {}", provider, raw);
                QuizError::shape(provider, "no text completion at any known path")
            })?;

        debug!("{} returned {} chars", provider, text.len());
        Ok(text.to_string())
    }
}
