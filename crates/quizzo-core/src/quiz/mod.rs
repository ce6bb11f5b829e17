//! Quiz domain
//!
//! Topics and multiple-choice questions generated by an LLM, the tolerant
//! parsers that recover them from free text, and the session that scores
//! a player's answers.

pub mod generator;
pub mod parser;
pub mod prompts;
pub mod session;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::quiz::OPTIONS_PER_QUESTION;

pub use generator::{generate_questions, generate_topics};
pub use parser::{parse_questions, parse_topics};
pub use session::{AnswerOutcome, QuizSession, SessionError};

/// A multiple-choice question
///
/// Options are positional and may have gaps when the model skipped an
/// option number; treat a missing option defensively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_text: String,
    pub options: [Option<String>; OPTIONS_PER_QUESTION],
    /// Zero-based index of the correct option, if the model gave one
    pub correct_index: Option<usize>,
}

impl Question {
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            ..Default::default()
        }
    }

    /// Option text at a zero-based index
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).and_then(|o| o.as_deref())
    }

    /// Number of options that actually have text
    pub fn populated_options(&self) -> usize {
        self.options.iter().filter(|o| o.is_some()).count()
    }

    /// Correct option text, if both the index and the option exist
    pub fn correct_option(&self) -> Option<&str> {
        self.correct_index.and_then(|i| self.option(i))
    }
}

/// Requested question difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}' (expected easy, medium, or hard)",
                other
            )),
        }
    }
}
