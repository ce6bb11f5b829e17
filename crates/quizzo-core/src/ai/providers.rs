//! AI provider configuration
//!
//! Defines the closed set of supported providers, how a free-text model name
//! resolves to one of them, and the built-in registry of endpoints and
//! authentication schemes.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::constants;

/// Unique identifier for each supported provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// OpenAI direct; also the fallback for unrecognized model names
    OpenAI,
    /// OpenAI models served from an Azure deployment
    AzureOpenAI,
    Anthropic,
    Google,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::OpenAI => write!(f, "OpenAI"),
            ProviderId::AzureOpenAI => write!(f, "Azure OpenAI"),
            ProviderId::Anthropic => write!(f, "Anthropic"),
            ProviderId::Google => write!(f, "Google"),
        }
    }
}

/// How to send the API key in requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthHeader {
    /// Use `Authorization: Bearer <key>` header (OpenAI style)
    Bearer,
    /// Use `x-api-key: <key>` header (Anthropic style)
    XApiKey,
    /// Use `api-key: <key>` header (Azure style)
    ApiKey,
}

/// Configuration for an AI provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Unique identifier
    pub id: ProviderId,
    /// Scheme and host of the API (without trailing slash).
    /// Empty for Azure, whose endpoint is supplied by the caller.
    pub base_url: String,
    /// How to send authentication
    pub auth_header: AuthHeader,
    /// Extra headers sent with every request
    pub custom_headers: HashMap<String, String>,
}

impl ProviderConfig {
    /// Whether the endpoint comes from the caller's credentials
    pub fn uses_caller_endpoint(&self) -> bool {
        self.base_url.is_empty()
    }
}

/// Lazily initialized built-in provider configurations
static BUILTIN_PROVIDERS: LazyLock<Vec<ProviderConfig>> = LazyLock::new(|| {
    vec![
        ProviderConfig {
            id: ProviderId::OpenAI,
            base_url: "https://api.openai.com".to_string(),
            auth_header: AuthHeader::Bearer,
            custom_headers: HashMap::new(),
        },
        ProviderConfig {
            id: ProviderId::AzureOpenAI,
            base_url: String::new(),
            auth_header: AuthHeader::ApiKey,
            custom_headers: HashMap::new(),
        },
        ProviderConfig {
            id: ProviderId::Anthropic,
            base_url: "https://api.anthropic.com".to_string(),
            auth_header: AuthHeader::XApiKey,
            custom_headers: HashMap::from([(
                "anthropic-version".to_string(),
                constants::ai::ANTHROPIC_API_VERSION.to_string(),
            )]),
        },
        ProviderConfig {
            id: ProviderId::Google,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            auth_header: AuthHeader::Bearer,
            custom_headers: HashMap::new(),
        },
    ]
});

/// Get a specific provider configuration by ID
pub fn get_provider(id: ProviderId) -> Option<&'static ProviderConfig> {
    BUILTIN_PROVIDERS.iter().find(|p| p.id == id)
}

// ============================================================================
// Model name resolution
// ============================================================================

/// Model-name keywords per provider family, checked in order; first match wins
const MODEL_FAMILIES: &[(&[&str], ProviderId)] = &[
    (&["gpt", "openai"], ProviderId::OpenAI),
    (&["claude", "anthropic"], ProviderId::Anthropic),
    (&["gemini", "google"], ProviderId::Google),
];

/// Resolve a free-text model name to a provider
///
/// Case-insensitive substring match against [`MODEL_FAMILIES`]. OpenAI-family
/// names go to Azure only when both Azure fields are present and non-empty.
/// Anything unrecognized is treated as OpenAI-compatible.
pub fn resolve_provider(
    model_name: &str,
    azure_endpoint: Option<&str>,
    azure_deployment_name: Option<&str>,
) -> ProviderId {
    let model = model_name.to_lowercase();

    let family = MODEL_FAMILIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| model.contains(k)))
        .map(|(_, provider)| *provider);

    match family {
        Some(ProviderId::OpenAI)
            if is_present(azure_endpoint) && is_present(azure_deployment_name) =>
        {
            ProviderId::AzureOpenAI
        }
        Some(provider) => provider,
        None => ProviderId::OpenAI,
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
