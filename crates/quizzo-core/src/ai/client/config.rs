//! AI Client configuration
//!
//! Request-scoped credentials plus the transport settings shared by every call.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::providers::{resolve_provider, ProviderConfig, ProviderId};
use crate::constants;

/// Caller-supplied credentials for a single call
///
/// Not owned or persisted by the client; pass a fresh value per request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Opaque API secret
    pub api_key: String,
    /// Free-text model identifier, sent to the provider as typed
    pub model_name: String,
    /// Azure resource endpoint, e.g. `https://my-resource.openai.azure.com`
    #[serde(default)]
    pub azure_endpoint: Option<String>,
    /// Azure deployment name
    #[serde(default)]
    pub azure_deployment_name: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: model_name.into(),
            azure_endpoint: None,
            azure_deployment_name: None,
        }
    }

    /// Attach an Azure endpoint and deployment
    pub fn with_azure(
        mut self,
        endpoint: impl Into<String>,
        deployment_name: impl Into<String>,
    ) -> Self {
        self.azure_endpoint = Some(endpoint.into());
        self.azure_deployment_name = Some(deployment_name.into());
        self
    }

    /// Resolve which provider these credentials address
    pub fn provider(&self) -> ProviderId {
        resolve_provider(
            &self.model_name,
            self.azure_endpoint.as_deref(),
            self.azure_deployment_name.as_deref(),
        )
    }
}

// Keep the key out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("model_name", &self.model_name)
            .field("azure_endpoint", &self.azure_endpoint)
            .field("azure_deployment_name", &self.azure_deployment_name)
            .finish()
    }
}

/// Configuration for the AI client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout; expiry surfaces as a provider request error
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Maximum output tokens
    pub max_tokens: usize,
    /// Sampling temperature
    pub temperature: f64,
    /// Optional scheme+host override for the fixed provider endpoints
    /// (proxies, tests). Azure always uses the caller's endpoint.
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: constants::http::REQUEST_TIMEOUT,
            connect_timeout: constants::http::CONNECT_TIMEOUT,
            max_tokens: constants::ai::MAX_OUTPUT_TOKENS,
            temperature: constants::ai::TEMPERATURE,
            base_url: None,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Base URL for a call to `provider`
    ///
    /// Providers without a fixed host (Azure) use the endpoint from the
    /// credentials; the override never applies to them.
    pub fn base_url_for<'a>(
        &'a self,
        provider: &'a ProviderConfig,
        credentials: &'a Credentials,
    ) -> &'a str {
        let base = if provider.uses_caller_endpoint() {
            credentials.azure_endpoint.as_deref().unwrap_or_default()
        } else {
            self.base_url.as_deref().unwrap_or(&provider.base_url)
        };
        base.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::providers::get_provider;

    #[test]
    fn test_debug_redacts_api_key() {
        let creds = Credentials::new("sk-secret-value", "gpt-4o");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("sk-secret-value"));
        assert!(debug.contains("gpt-4o"));
    }

    #[test]
    fn test_credentials_provider() {
        let creds = Credentials::new("k", "gpt-4o");
        assert_eq!(creds.provider(), ProviderId::OpenAI);

        let azure = creds.with_azure("https://res.openai.azure.com", "prod");
        assert_eq!(azure.provider(), ProviderId::AzureOpenAI);
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.temperature, 0.7);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url_override() {
        let openai = get_provider(ProviderId::OpenAI).unwrap();
        let creds = Credentials::new("k", "gpt-4o");
        let config = ClientConfig::default();
        assert_eq!(config.base_url_for(openai, &creds), "https://api.openai.com");

        let config = config.with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url_for(openai, &creds), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_azure_base_url_comes_from_credentials() {
        let azure = get_provider(ProviderId::AzureOpenAI).unwrap();
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9000");

        let creds = Credentials::new("k", "gpt-4o").with_azure("https://res.openai.azure.com/", "d");
        assert_eq!(config.base_url_for(azure, &creds), "https://res.openai.azure.com");

        let creds = Credentials::new("k", "gpt-4o");
        assert_eq!(config.base_url_for(azure, &creds), "");
    }
}
