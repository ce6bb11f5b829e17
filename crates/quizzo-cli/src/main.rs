//! Quizzo - LLM-generated trivia in the terminal
//!
//! Picks quirky quiz topics from your interests, asks the configured model for
//! multiple-choice questions, and keeps score:
//! - OpenAI, Azure OpenAI, Anthropic, and Google models
//! - Settings stored in ~/.quizzo/settings.json

use std::io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use quizzo_core::quiz::{generate_questions, generate_topics, Difficulty, QuizSession};
use quizzo_core::storage::{Settings, NOT_CONFIGURED_MESSAGE};
use quizzo_core::{paths, AiClient, ClientConfig, Credentials};

mod play;

use play::Prompter;

/// Quizzo - LLM quiz generator
#[derive(Parser)]
#[command(name = "quizzo")]
#[command(about = "Quirky multiple-choice quizzes written by your favourite LLM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz (default)
    Play {
        /// Skip topic suggestions and use this topic
        #[arg(short, long)]
        topic: Option<String>,

        /// Question difficulty: easy, medium, or hard
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },

    /// Suggest topics without starting a quiz
    Topics {
        /// Interests to steer the suggestions (defaults to saved interests)
        #[arg(short, long)]
        interests: Option<String>,
    },

    /// Update saved settings; with no flags, show them
    Configure {
        /// Provider API key
        #[arg(long)]
        api_key: Option<String>,

        /// Model name, e.g. gpt-4o, claude-3-5-sonnet-latest, gemini-1.5-pro
        #[arg(short, long)]
        model: Option<String>,

        /// Azure OpenAI resource endpoint
        #[arg(long)]
        azure_endpoint: Option<String>,

        /// Azure OpenAI deployment name
        #[arg(long)]
        azure_deployment: Option<String>,

        /// Interests used for topic suggestions
        #[arg(short, long)]
        interests: Option<String>,

        /// Forget the Azure endpoint and deployment
        #[arg(long, conflicts_with_all = ["azure_endpoint", "azure_deployment"])]
        clear_azure: bool,
    },
}

/// Saved settings with environment overrides, refusing to continue unconfigured
fn load_configured() -> Result<Settings> {
    let settings = Settings::load()
        .context("Failed to read settings")?
        .with_env_overrides();
    if !settings.is_configured() {
        bail!(
            "{}: run `quizzo configure --api-key <KEY> --model <MODEL>`",
            NOT_CONFIGURED_MESSAGE
        );
    }
    Ok(settings)
}

fn show_settings(settings: &Settings) {
    let key = if settings.api_key.is_empty() {
        "(not set)".to_string()
    } else {
        let count = settings.api_key.chars().count();
        let tail: String = settings.api_key.chars().skip(count.saturating_sub(4)).collect();
        format!("****{}", tail)
    };
    let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "(not set)".to_string());

    println!("Settings ({})", Settings::path().display());
    println!("  API key:          {}", key);
    println!(
        "  Model:            {}",
        if settings.model_name.is_empty() {
            "(not set)"
        } else {
            settings.model_name.as_str()
        }
    );
    println!("  Azure endpoint:   {}", or_unset(&settings.azure_endpoint));
    println!("  Azure deployment: {}", or_unset(&settings.azure_deployment_name));
    println!("  Interests:        {}", or_unset(&settings.interests));
    if settings.is_configured() {
        println!("  Provider:         {}", settings.credentials().provider());
    }
}

async fn suggest_topics(
    client: &AiClient,
    credentials: &Credentials,
    interests: Option<&str>,
) -> Result<Vec<String>> {
    println!("Asking {} for topics...", credentials.provider());
    generate_topics(client, credentials, interests)
        .await
        .context("Please check your API settings")
}

async fn play(topic: Option<String>, difficulty: Option<Difficulty>) -> Result<()> {
    let settings = load_configured()?;
    let credentials = settings.credentials();
    let client = AiClient::new(ClientConfig::default());

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut fixed_topic = topic;

    loop {
        let topic = match fixed_topic.take() {
            Some(topic) => topic,
            None => {
                let topics = suggest_topics(&client, &credentials, settings.interests()).await?;
                match play::choose_topic(&mut prompter, &topics)? {
                    Some(topic) => topic,
                    None => return Ok(()),
                }
            }
        };

        let difficulty = match difficulty {
            Some(d) => d,
            None => match play::choose_difficulty(&mut prompter)? {
                Some(d) => d,
                None => return Ok(()),
            },
        };

        prompter.say(format!("Generating {} questions on \"{}\"...", difficulty, topic))?;
        let questions = generate_questions(&client, &credentials, &topic, difficulty)
            .await
            .context("Please check your API settings")?;

        if questions.is_empty() {
            prompter.say("The model's reply could not be turned into questions. Try again.")?;
        } else {
            let mut session = QuizSession::new(topic, difficulty, questions);
            if !play::run_session(&mut prompter, &mut session)? {
                return Ok(());
            }
        }

        if !play::confirm(&mut prompter, "\nPlay again? [y/N]")? {
            return Ok(());
        }
    }
}

async fn list_topics(interests: Option<String>) -> Result<()> {
    let settings = load_configured()?;
    let interests = interests.as_deref().or(settings.interests());
    let client = AiClient::new(ClientConfig::default());

    let topics = suggest_topics(&client, &settings.credentials(), interests).await?;
    if topics.is_empty() {
        println!("No topics could be read from the model's reply.");
    }
    for (i, topic) in topics.iter().enumerate() {
        println!("  {}) {}", i + 1, topic);
    }
    Ok(())
}

fn configure(
    api_key: Option<String>,
    model: Option<String>,
    azure_endpoint: Option<String>,
    azure_deployment: Option<String>,
    interests: Option<String>,
    clear_azure: bool,
) -> Result<()> {
    let mut settings = Settings::load().context("Failed to read settings")?;

    let changed = api_key.is_some()
        || model.is_some()
        || azure_endpoint.is_some()
        || azure_deployment.is_some()
        || interests.is_some()
        || clear_azure;
    if !changed {
        show_settings(&settings);
        return Ok(());
    }

    if let Some(key) = api_key {
        settings.api_key = key.trim().to_string();
    }
    if let Some(model) = model {
        settings.model_name = model.trim().to_string();
    }
    if let Some(endpoint) = azure_endpoint {
        settings.azure_endpoint = Some(endpoint.trim().to_string());
    }
    if let Some(deployment) = azure_deployment {
        settings.azure_deployment_name = Some(deployment.trim().to_string());
    }
    if let Some(interests) = interests {
        settings.interests = Some(interests);
    }
    if clear_azure {
        settings.azure_endpoint = None;
        settings.azure_deployment_name = None;
    }

    settings.save().context("Failed to save settings")?;
    tracing::info!("Settings updated");
    println!("Settings saved.");
    show_settings(&settings);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file so output never interleaves with the prompts
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    if let Ok(log_file) = std::fs::File::create(log_dir.join("quizzo.log")) {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .with_writer(std::sync::Mutex::new(log_file))
            .with_ansi(false)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Topics { interests }) => list_topics(interests).await,
        Some(Commands::Configure {
            api_key,
            model,
            azure_endpoint,
            azure_deployment,
            interests,
            clear_azure,
        }) => configure(
            api_key,
            model,
            azure_endpoint,
            azure_deployment,
            interests,
            clear_azure,
        ),
        Some(Commands::Play { topic, difficulty }) => play(topic, difficulty).await,
        None => play(None, None).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::try_parse_from(["quizzo", "play", "-t", "Bees", "-d", "Hard"]).unwrap();
        match cli.command {
            Some(Commands::Play { topic, difficulty }) => {
                assert_eq!(topic.as_deref(), Some("Bees"));
                assert_eq!(difficulty, Some(Difficulty::Hard));
            }
            _ => panic!("expected play"),
        }

        assert!(Cli::try_parse_from(["quizzo", "play", "-d", "brutal"]).is_err());
        assert!(Cli::try_parse_from(["quizzo"]).unwrap().command.is_none());
    }

    #[test]
    fn test_clear_azure_conflicts() {
        assert!(Cli::try_parse_from([
            "quizzo",
            "configure",
            "--clear-azure",
            "--azure-endpoint",
            "https://x"
        ])
        .is_err());
    }
}
