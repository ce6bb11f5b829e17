//! Quiz session state
//!
//! Walks through a fixed list of questions, one answer per question.

use thiserror::Error;

use super::{Difficulty, Question};

/// Why an answer was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("this question has already been answered")]
    AlreadyAnswered,

    #[error("option {0} is not available for this question")]
    InvalidOption(usize),

    #[error("the quiz is already finished")]
    Finished,
}

/// Result of an accepted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Correct option, for showing the right answer after a miss
    pub correct_index: Option<usize>,
}

/// A single play-through of a generated question set
#[derive(Debug, Clone)]
pub struct QuizSession {
    topic: String,
    difficulty: Difficulty,
    questions: Vec<Question>,
    index: usize,
    score: usize,
    selected: Option<usize>,
}

impl QuizSession {
    pub fn new(topic: impl Into<String>, difficulty: Difficulty, questions: Vec<Question>) -> Self {
        Self {
            topic: topic.into(),
            difficulty,
            questions,
            index: 0,
            score: 0,
            selected: None,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based position of the current question
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Answer picked for the current question, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Percentage of the way through, counting the current question
    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let shown = (self.index + 1).min(self.questions.len());
        shown as f64 / self.questions.len() as f64 * 100.0
    }

    /// Record an answer for the current question
    ///
    /// Only the first answer counts. The option must exist on the question.
    pub fn select_answer(&mut self, option: usize) -> Result<AnswerOutcome, SessionError> {
        let question = self.current().ok_or(SessionError::Finished)?;
        if self.selected.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        if question.option(option).is_none() {
            return Err(SessionError::InvalidOption(option));
        }

        let correct_index = question.correct_index;
        let correct = correct_index == Some(option);

        self.selected = Some(option);
        if correct {
            self.score += 1;
        }

        Ok(AnswerOutcome {
            correct,
            correct_index,
        })
    }

    /// Move on to the next question; false once the quiz is over
    pub fn advance(&mut self) -> bool {
        if !self.is_finished() {
            self.index += 1;
            self.selected = None;
        }
        !self.is_finished()
    }
}
