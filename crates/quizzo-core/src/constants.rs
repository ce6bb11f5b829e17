//! Application constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

use std::time::Duration;

/// HTTP client configuration
pub mod http {
    use super::*;

    /// Connection timeout for HTTP requests
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Whole-request timeout. Completions are non-streaming, so this bounds
    /// the time until the full body arrives.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// User agent sent with every provider request
    pub const USER_AGENT: &str = "Quizzo/0.1";
}

/// AI/LLM configuration
pub mod ai {
    /// Maximum output tokens requested from every provider
    pub const MAX_OUTPUT_TOKENS: usize = 1000;

    /// Sampling temperature (not sent to Anthropic)
    pub const TEMPERATURE: f64 = 0.7;

    /// `anthropic-version` header value
    pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

    /// `api-version` query parameter for Azure OpenAI deployments
    pub const AZURE_API_VERSION: &str = "2025-01-01-preview";
}

/// Quiz generation limits
pub mod quiz {
    /// Topics kept from a single generation request
    pub const MAX_TOPICS: usize = 5;

    /// Questions kept from a single generation request
    pub const MAX_QUESTIONS: usize = 5;

    /// Answer options per question
    pub const OPTIONS_PER_QUESTION: usize = 4;

    /// Topics must be longer than this many characters after trimming
    pub const MIN_TOPIC_CHARS: usize = 3;
}

/// Local configuration
pub mod ui {
    /// Config directory name
    pub const CONFIG_DIR_NAME: &str = ".quizzo";

    /// Logs subdirectory name
    pub const LOGS_DIR_NAME: &str = "logs";

    /// Settings file name
    pub const SETTINGS_FILE_NAME: &str = "settings.json";
}
