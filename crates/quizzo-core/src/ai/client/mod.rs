//! AI Client module
//!
//! Provider-agnostic, non-streaming API client supporting:
//! - OpenAI chat/completions (direct and Azure)
//! - Anthropic messages
//! - Google generateContent
//!
//! Each call routes to the appropriate format handler based on the provider.

pub mod config;
pub mod core;

// Re-export main types
pub use config::{ClientConfig, Credentials};
pub use self::core::{AiClient, CompletionDispatcher};
