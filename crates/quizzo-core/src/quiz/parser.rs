//! Tolerant parsers for model output
//!
//! Models are asked for a fixed layout but rarely follow it exactly. Each
//! parser tries the requested layout first and degrades to looser heuristics;
//! none of them fail, they return fewer (or emptier) records instead.
//!
//! Question layout requested from the model:
//! ```text
//! Question 1: [question text]
//! Option 1: [option text]
//! Option 2: [option text]
//! Option 3: [option text]
//! Option 4: [option text]
//! Correct: [correct option number]
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::Question;
use crate::constants::quiz::{MAX_QUESTIONS, MAX_TOPICS, MIN_TOPIC_CHARS, OPTIONS_PER_QUESTION};

// ============================================================================
// Static regex patterns (compiled once)
// ============================================================================

/// "1. Topic"
static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.\s*(.+)$").unwrap());

/// "- Topic" or "* Topic"
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s*(.+)$").unwrap());

/// "Question 3: text" (number optional)
static RE_QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Question\s*[0-9]*:\s*(.+)").unwrap());

/// "Option 2: text"
static RE_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Option\s*([0-9]+):\s*(.+)").unwrap());

/// "Correct: 2"
static RE_CORRECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Correct:\s*([0-9]+)").unwrap());

/// Question marker without requiring text on the same line
static RE_QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Question\s*[0-9]*:").unwrap());

/// Leading "Option N:" on a fallback option line
static RE_OPTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Option\s*[0-9]*:\s*").unwrap());

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

// ============================================================================
// Topics
// ============================================================================

/// Strip a leading "N." or "-"/"*" list marker, if the line has one
fn strip_list_marker(line: &str) -> Option<&str> {
    RE_NUMBERED
        .captures(line)
        .or_else(|| RE_BULLET.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_usable_topic(topic: &str) -> bool {
    topic.chars().count() > MIN_TOPIC_CHARS
}

/// Extract up to five topics from a model reply
///
/// One topic per line with list markers stripped. A reply with no usable
/// lines, or a single unmarked line holding a comma-separated list, is split
/// on commas and newlines instead. Duplicates are dropped, order is kept.
pub fn parse_topics(text: &str) -> Vec<String> {
    let lines: Vec<&str> = non_empty_lines(text).collect();

    let mut topics: Vec<String> = Vec::new();
    for &line in &lines {
        let topic = strip_list_marker(line).unwrap_or(line).trim();
        if is_usable_topic(topic) && !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_string());
        }
    }

    let inline_list =
        lines.len() == 1 && strip_list_marker(lines[0]).is_none() && lines[0].contains(',');

    if topics.is_empty() || inline_list {
        topics = split_topic_fragments(text);
        debug!("Topics split on commas and newlines: {} found", topics.len());
    } else {
        debug!("Topics read one per line: {} found", topics.len());
    }

    topics.truncate(MAX_TOPICS);
    topics
}

/// Split on commas and newlines, keeping fragments long enough to be topics
fn split_topic_fragments(text: &str) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for fragment in text.split(|c: char| c == ',' || c == '\n').map(str::trim) {
        if is_usable_topic(fragment) && !topics.iter().any(|t| t == fragment) {
            topics.push(fragment.to_string());
        }
    }
    topics
}

// ============================================================================
// Questions
// ============================================================================

/// Line-driven accumulator for the labelled question layout
#[derive(Debug, Default)]
struct QuestionAccumulator {
    current: Option<Question>,
    done: Vec<Question>,
}

impl QuestionAccumulator {
    fn feed(mut self, line: &str) -> Self {
        if let Some(caps) = RE_QUESTION.captures(line) {
            if let Some(finished) = self.current.take() {
                self.done.push(finished);
            }
            self.current = Some(Question::new(caps[1].trim()));
            return self;
        }

        let Some(current) = self.current.as_mut() else {
            return self;
        };

        if let Some(caps) = RE_OPTION.captures(line) {
            // 1-based in the text; out-of-range numbers are dropped
            match caps[1].parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) if index < OPTIONS_PER_QUESTION => {
                    current.options[index] = Some(caps[2].trim().to_string());
                }
                _ => debug!("Ignoring out-of-range option line: {}", line),
            }
        } else if let Some(caps) = RE_CORRECT.captures(line) {
            current.correct_index = caps[1].parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        }

        self
    }

    /// The trailing question only counts if it got at least one option
    fn finish(mut self) -> Vec<Question> {
        if let Some(last) = self.current.take() {
            if last.populated_options() > 0 {
                self.done.push(last);
            }
        }
        self.done
    }
}

/// Extract up to five questions from a model reply
///
/// Reads the labelled `Question/Option/Correct` layout line by line. If that
/// yields nothing, falls back to splitting on question markers and reading
/// each block positionally (text, then four options), defaulting the correct
/// answer to the first option. Partially parsed questions are returned as-is.
pub fn parse_questions(text: &str) -> Vec<Question> {
    let mut questions = non_empty_lines(text)
        .fold(QuestionAccumulator::default(), QuestionAccumulator::feed)
        .finish();

    if questions.is_empty() {
        questions = parse_question_blocks(text);
        if !questions.is_empty() {
            warn!(
                "Questions did not follow the labelled layout, recovered {} from blocks",
                questions.len()
            );
        }
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}

/// Positional fallback: blocks between question markers
fn parse_question_blocks(text: &str) -> Vec<Question> {
    // Everything before the first marker is preamble
    RE_QUESTION_MARKER
        .split(text)
        .skip(1)
        .filter_map(|block| {
            let lines: Vec<&str> = non_empty_lines(block).collect();
            if lines.len() < 1 + OPTIONS_PER_QUESTION {
                return None;
            }

            let mut question = Question::new(lines[0]);
            for (slot, line) in question.options.iter_mut().zip(&lines[1..]) {
                *slot = Some(RE_OPTION_PREFIX.replace(line, "").trim().to_string());
            }
            question.correct_index = Some(0);
            Some(question)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed(count: usize) -> String {
        (1..=count)
            .map(|n| {
                format!(
                    "Question {n}: What is question number {n}?\n\
                     Option 1: Alpha {n}\n\
                     Option 2: Beta {n}\n\
                     Option 3: Gamma {n}\n\
                     Option 4: Delta {n}\n\
                     Correct: {}\n",
                    (n % 4) + 1
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ------------------------------------------------------------------
    // Topics
    // ------------------------------------------------------------------

    #[test]
    fn test_numbered_topics() {
        assert_eq!(
            parse_topics("1. Cats\n2. Dogs\n3. Birds\n4. Fish\n5. Bees"),
            vec!["Cats", "Dogs", "Birds", "Fish", "Bees"]
        );
    }

    #[test]
    fn test_inline_comma_list() {
        assert_eq!(
            parse_topics("Cats, Dogs, Birds, Fish"),
            vec!["Cats", "Dogs", "Birds", "Fish"]
        );
    }

    #[test]
    fn test_single_line_topic_with_comma_is_split() {
        // A lone unmarked line is read as an inline list, even when the
        // comma belongs to one topic
        assert_eq!(
            parse_topics("Street food in Kolkata, India"),
            vec!["Street food in Kolkata", "India"]
        );
        assert_eq!(
            parse_topics("1. Street food in Kolkata, India"),
            vec!["Street food in Kolkata, India"]
        );
    }

    #[test]
    fn test_bulleted_topics_with_crlf() {
        assert_eq!(
            parse_topics("- Street food in Kolkata\r\n* Villains of the Avengers\r\n"),
            vec!["Street food in Kolkata", "Villains of the Avengers"]
        );
    }

    #[test]
    fn test_unmarked_lines_are_kept_whole() {
        let text = "Here are your topics:\n\n1. Medieval siege engines\n2. Deep sea bioluminescence";
        assert_eq!(
            parse_topics(text),
            vec![
                "Here are your topics:",
                "Medieval siege engines",
                "Deep sea bioluminescence"
            ]
        );
    }

    #[test]
    fn test_topics_dedup_and_short_lines() {
        let text = "1. Jazz\n2. Jazz\n3. Art\n4. Tea\n5. Opera";
        assert_eq!(parse_topics(text), vec!["Jazz", "Opera"]);
    }

    #[test]
    fn test_topics_truncated_to_five() {
        let text = (1..=8)
            .map(|n| format!("{n}. Topic number {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let topics = parse_topics(&text);
        assert_eq!(topics.len(), 5);
        assert_eq!(topics[0], "Topic number 1");
        assert_eq!(topics[4], "Topic number 5");
    }

    #[test]
    fn test_topics_nothing_usable() {
        assert!(parse_topics("").is_empty());
        assert!(parse_topics("a\nb,c\nxyz").is_empty());
    }

    #[test]
    fn test_topics_idempotent() {
        let text = "1. Cats\n- Dogs\nRandom line here";
        assert_eq!(parse_topics(text), parse_topics(text));
    }

    // ------------------------------------------------------------------
    // Questions
    // ------------------------------------------------------------------

    #[test]
    fn test_five_well_formed_questions() {
        let questions = parse_questions(&well_formed(5));
        assert_eq!(questions.len(), 5);

        for (i, q) in questions.iter().enumerate() {
            let n = i + 1;
            assert_eq!(q.question_text, format!("What is question number {n}?"));
            assert_eq!(q.populated_options(), 4);
            assert_eq!(q.option(0), Some(format!("Alpha {n}").as_str()));
            assert_eq!(q.option(3), Some(format!("Delta {n}").as_str()));
            assert_eq!(q.correct_index, Some(n % 4));
        }
    }

    #[test]
    fn test_two_questions_are_not_padded() {
        let questions = parse_questions(&well_formed(2));
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_eight_questions_truncated_in_order() {
        let questions = parse_questions(&well_formed(8));
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0].question_text, "What is question number 1?");
        assert_eq!(questions[4].question_text, "What is question number 5?");
    }

    #[test]
    fn test_case_insensitive_and_out_of_order_options() {
        let text = "QUESTION 1: Largest planet?\n\
                    option 3: Saturn\n\
                    OPTION 1: Jupiter\n\
                    correct: 1\n";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 1);

        let q = &questions[0];
        assert_eq!(q.question_text, "Largest planet?");
        assert_eq!(q.options[0].as_deref(), Some("Jupiter"));
        assert_eq!(q.options[1], None);
        assert_eq!(q.options[2].as_deref(), Some("Saturn"));
        assert_eq!(q.options[3], None);
        assert_eq!(q.correct_index, Some(0));
        assert_eq!(q.correct_option(), Some("Jupiter"));
    }

    #[test]
    fn test_missing_correct_and_bad_option_numbers() {
        let text = "Question: Pick one\nOption 0: zero\nOption 5: five\nOption 2: two\nCorrect: 0";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].populated_options(), 1);
        assert_eq!(questions[0].option(1), Some("two"));
        assert_eq!(questions[0].correct_index, None);
    }

    #[test]
    fn test_lines_before_first_question_are_ignored() {
        let text = "Sure! Option 1: not a question\nCorrect: 3\n\nQuestion 1: Real one?\nOption 1: Yes";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_text, "Real one?");
        assert_eq!(questions[0].correct_index, None);
    }

    #[test]
    fn test_trailing_question_without_options_dropped() {
        let text = "Question 1: First?\nOption 1: A\nCorrect: 1\nQuestion 2: Cut off mid-";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_text, "First?");
    }

    #[test]
    fn test_earlier_question_without_options_kept() {
        let text = "Question 1: No options here\nQuestion 2: Second?\nOption 1: A";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].populated_options(), 0);
    }

    #[test]
    fn test_block_fallback() {
        let text = "Here you go:\n\
                    Question 1:\n\
                    What colour is the sky?\n\
                    Blue\n\
                    Option 2: Green\n\
                    Red\n\
                    Yellow\n\
                    \n\
                    Question 2:\n\
                    Too short\n\
                    A\n\
                    B\n";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 1);

        let q = &questions[0];
        assert_eq!(q.question_text, "What colour is the sky?");
        assert_eq!(q.option(0), Some("Blue"));
        assert_eq!(q.option(1), Some("Green"));
        assert_eq!(q.option(3), Some("Yellow"));
        assert_eq!(q.correct_index, Some(0));
    }

    #[test]
    fn test_no_markers_yields_nothing() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("What is 2+2?\n3\n4\n5\n6\n").is_empty());
    }

    #[test]
    fn test_questions_idempotent() {
        let text = well_formed(3);
        assert_eq!(parse_questions(&text), parse_questions(&text));
    }
}
