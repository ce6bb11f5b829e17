//! Interactive quiz flow on a line-based terminal
//!
//! Generic over the input and output streams so the flow can be driven by
//! scripted input in tests.

use std::io::{BufRead, Write};

use anyhow::Result;
use quizzo_core::quiz::{Difficulty, QuizSession, SessionError};

/// Line-oriented prompt over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

/// Let the player pick a generated topic by number or type their own
pub fn choose_topic<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    topics: &[String],
) -> Result<Option<String>> {
    if topics.is_empty() {
        prompter.say("No topics came back this time.")?;
    } else {
        prompter.say("Pick a topic:")?;
        for (i, topic) in topics.iter().enumerate() {
            prompter.say(format!("  {}) {}", i + 1, topic))?;
        }
    }

    loop {
        let Some(answer) = prompter.ask("Topic number, or type your own:")? else {
            return Ok(None);
        };
        if answer.is_empty() {
            continue;
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=topics.len()).contains(&n) => return Ok(Some(topics[n - 1].clone())),
            Ok(_) if !topics.is_empty() => {
                prompter.say(format!("Choose between 1 and {}.", topics.len()))?
            }
            _ => return Ok(Some(answer)),
        }
    }
}

/// Ask for a difficulty; empty input picks the default
pub fn choose_difficulty<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<Difficulty>> {
    let choices: Vec<&str> = Difficulty::all().iter().map(Difficulty::as_str).collect();
    let prompt = format!(
        "Difficulty [{}] ({}):",
        choices.join("/"),
        Difficulty::default()
    );

    loop {
        let Some(answer) = prompter.ask(&prompt)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(Difficulty::default()));
        }
        match answer.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(Some(difficulty)),
            Err(e) => prompter.say(e)?,
        }
    }
}

/// Walk the player through every question; returns false if input ran out
pub fn run_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    session: &mut QuizSession,
) -> Result<bool> {
    prompter.say(format!(
        "\n{} ({}), {} questions",
        session.topic(),
        session.difficulty(),
        session.len()
    ))?;

    while let Some(question) = session.current().cloned() {
        prompter.say(format!(
            "\nQuestion {} of {} ({:.0}%)",
            session.index() + 1,
            session.len(),
            session.progress_percent()
        ))?;
        prompter.say(&question.question_text)?;

        if question.populated_options() == 0 {
            prompter.say("  (no options were provided for this question, skipping)")?;
            session.advance();
            continue;
        }

        for (i, option) in question.options.iter().enumerate() {
            if let Some(text) = option {
                prompter.say(format!("  {}) {}", i + 1, text))?;
            }
        }

        loop {
            let Some(answer) = prompter.ask("Your answer:")? else {
                return Ok(false);
            };
            let choice = match answer.parse::<usize>() {
                Ok(n) if n >= 1 => n - 1,
                _ => {
                    prompter.say("Enter the option number.")?;
                    continue;
                }
            };

            match session.select_answer(choice) {
                Ok(outcome) if outcome.correct => {
                    prompter.say("Correct!")?;
                    break;
                }
                Ok(outcome) => {
                    match outcome.correct_index.and_then(|i| question.option(i)) {
                        Some(text) => prompter.say(format!("Wrong. The answer was: {}", text))?,
                        None => prompter.say("Wrong. No correct answer was given for this one.")?,
                    }
                    break;
                }
                Err(SessionError::InvalidOption(_)) => {
                    prompter.say("That option isn't available.")?;
                }
                Err(e) => {
                    prompter.say(e.to_string())?;
                    break;
                }
            }
        }

        session.advance();
    }

    prompter.say(format!(
        "\nQuiz finished: {} out of {} correct",
        session.score(),
        session.len()
    ))?;
    Ok(true)
}

/// "y"/"yes" (any case) means yes; anything else, including end of input, means no
pub fn confirm<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, prompt: &str) -> Result<bool> {
    Ok(prompter
        .ask(prompt)?
        .is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
}
