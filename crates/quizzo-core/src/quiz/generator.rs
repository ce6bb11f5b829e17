//! Topic and question generation
//!
//! One completion call per operation. Parsing never fails, so a reply the
//! parsers cannot make sense of yields an empty list rather than an error.

use tracing::{info, warn};

use super::parser::{parse_questions, parse_topics};
use super::prompts::{questions_prompt, topics_prompt};
use super::{Difficulty, Question};
use crate::ai::client::{CompletionDispatcher, Credentials};
use crate::error::QuizError;

/// Ask the model for up to five quiz topics
pub async fn generate_topics(
    dispatcher: &dyn CompletionDispatcher,
    credentials: &Credentials,
    interests: Option<&str>,
) -> Result<Vec<String>, QuizError> {
    let provider = credentials.provider();
    let prompt = topics_prompt(interests);

    let text = dispatcher
        .dispatch(provider, credentials, &prompt)
        .await
        .map_err(|e| {
            warn!("Topic generation failed: {}", e);
            e.context("Failed to generate topics")
        })?;

    let topics = parse_topics(&text);
    info!("Generated {} topics via {}", topics.len(), provider);
    Ok(topics)
}

/// Ask the model for up to five questions on `topic`
pub async fn generate_questions(
    dispatcher: &dyn CompletionDispatcher,
    credentials: &Credentials,
    topic: &str,
    difficulty: Difficulty,
) -> Result<Vec<Question>, QuizError> {
    let provider = credentials.provider();
    let prompt = questions_prompt(topic, difficulty);

    let text = dispatcher
        .dispatch(provider, credentials, &prompt)
        .await
        .map_err(|e| {
            warn!("Question generation failed: {}", e);
            e.context("Failed to generate questions")
        })?;

    let questions = parse_questions(&text);
    if questions.is_empty() {
        warn!("No questions recovered from {} chars of output", text.len());
    }
    info!(
        "Generated {} {} questions on '{}' via {}",
        questions.len(),
        difficulty,
        topic,
        provider
    );
    Ok(questions)
}
