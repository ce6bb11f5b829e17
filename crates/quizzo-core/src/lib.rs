//! Quizzo Core - Shared library for LLM-generated quizzes
//!
//! This crate provides the core functionality for the Quizzo CLI:
//! - Provider resolution and request dispatch for OpenAI, Azure OpenAI,
//!   Anthropic, and Google
//! - Tolerant parsing of topics and questions out of model output
//! - Quiz sessions and scoring
//! - Settings storage

pub mod ai;
pub mod constants;
pub mod error;
pub mod paths;
pub mod quiz;
pub mod storage;

// Re-exports for convenience
pub use ai::client::{AiClient, ClientConfig, CompletionDispatcher, Credentials};
pub use ai::providers::{resolve_provider, ProviderId};
pub use error::{QuizError, QuizErrorKind};
pub use quiz::{
    generate_questions, generate_topics, parse_questions, parse_topics, Difficulty, Question,
    QuizSession,
};
pub use storage::Settings;
