//! AI provider layer
//!
//! Resolves a model name to a provider (OpenAI, Azure OpenAI, Anthropic, Google)
//! and sends single-prompt completions in each provider's wire format.

pub mod client;
pub mod format;
pub mod providers;

pub use client::{AiClient, ClientConfig, CompletionDispatcher, Credentials};
pub use providers::{resolve_provider, ProviderId};
