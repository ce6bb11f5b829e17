//! Prompt templates for topic and question generation

use super::Difficulty;

/// Shared tail of the topics prompt, steering away from generic categories
const TOPICS_GUIDANCE: &str = "The topics need to be a little quirky and a little specific. \
For example, can be Street food in Kolkata and not just Food or Villians in the Avengers series \
and not just Comics.";

/// Build the topics prompt; blank interests count as none
pub fn topics_prompt(interests: Option<&str>) -> String {
    match interests.map(str::trim).filter(|s| !s.is_empty()) {
        Some(interests) => format!(
            "Please provide 5 quiz topics based on these interests: {}. {}",
            interests, TOPICS_GUIDANCE
        ),
        None => format!("Please provide 5 quiz topics. {}", TOPICS_GUIDANCE),
    }
}

/// Build the questions prompt, spelling out the layout the parser expects
pub fn questions_prompt(topic: &str, difficulty: Difficulty) -> String {
    format!(
        "Please provide 5 questions of {difficulty} difficulty level on the topic \"{topic}\". \
For each question, provide 4 possible answers and also the correct answer. \
Please send in the response as:
Question 1: [question text]
Option 1: [option text]
Option 2: [option text]
Option 3: [option text]
Option 4: [option text]
Correct: [correct option number]

Question 2: [question text]
Option 1: [option text]
Option 2: [option text]
Option 3: [option text]
Option 4: [option text]
Correct: [correct option number]

And so on for all 5 questions.",
        difficulty = difficulty.as_str(),
        topic = topic.trim(),
    )
}
