//! Evoke CLI - answer evaluation for cognitive recall practice

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use evoke_core::config::Config;
use evoke_core::evaluate::{Evaluation, MatchSettings, evaluate};
use evoke_core::profile::{self, PersonalProfile};
use evoke_core::prompts::{self, Subject};
use evoke_core::session::{PromptResponse, SessionStatistics};

#[derive(Parser)]
#[command(name = "evoke")]
#[command(author, version, about = "Answer evaluation for recall practice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a user answer against an expected answer
    Evaluate {
        /// The user's transcribed answer
        answer: String,
        /// The expected answer
        expected: String,
        /// Acceptable alternative answers (repeatable)
        #[arg(short, long)]
        acceptable: Vec<String>,
        /// Disable every optional strategy (exact match only)
        #[arg(long)]
        strict: bool,
    },

    /// Generate recall prompts from contacts
    Prompts {
        #[command(subcommand)]
        action: PromptAction,
    },

    /// Personal-information practice
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Session statistics
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum PromptAction {
    /// Generate a session's prompts from a contacts JSON file
    Generate {
        /// Path to a JSON array of contacts
        #[arg(short, long)]
        subjects: PathBuf,
        /// Seed for reproducible shuffling
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Generate practice items from a profile JSON file
    Items {
        /// Path to a profile JSON object
        #[arg(short, long)]
        profile: PathBuf,
        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Aggregate a session's responses from a JSON file
    Stats {
        /// Path to a JSON array of graded responses
        #[arg(short, long)]
        responses: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("evoke=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            answer,
            expected,
            acceptable,
            strict,
        } => cmd_evaluate(&answer, &expected, &acceptable, strict, cli.format, cli.quiet),

        Commands::Prompts {
            action: PromptAction::Generate { subjects, seed },
        } => cmd_generate_prompts(&subjects, seed, cli.format, cli.quiet),

        Commands::Profile {
            action: ProfileAction::Items { profile, seed },
        } => cmd_profile_items(&profile, seed, cli.format, cli.quiet),

        Commands::Session {
            action: SessionAction::Stats { responses },
        } => cmd_session_stats(&responses, cli.format),

        Commands::Config { action } => cmd_config(action, cli.quiet),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_evaluate(
    answer: &str,
    expected: &str,
    acceptable: &[String],
    strict: bool,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let settings = if strict {
        MatchSettings::strict()
    } else {
        Config::load()?.matching
    };
    debug!(strict, "match settings resolved");

    let result = evaluate(answer, expected, acceptable, &settings)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, e.code()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_evaluation(&result, quiet),
    }
    Ok(())
}

fn print_evaluation(result: &Evaluation, quiet: bool) {
    let verdict = match (result.is_correct, result.is_partial) {
        (true, false) => "Correct",
        (true, true) => "Partially correct",
        _ => "Incorrect",
    };
    if quiet {
        println!("{}", verdict);
    } else {
        println!("{} (score {:.2})", verdict, result.correctness_score);
    }
}

fn cmd_generate_prompts(
    subjects_path: &Path,
    seed: Option<u64>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let subjects: Vec<Subject> = read_json(subjects_path)?;
    debug!(count = subjects.len(), "contacts loaded");
    let mut rng = seeded_rng(seed);
    let prompts = prompts::generate(&subjects, &mut rng);
    if prompts.is_empty() {
        anyhow::bail!(
            "At least {} contacts required to generate prompts, got {}.",
            prompts::MIN_SUBJECTS,
            subjects.len()
        );
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prompts)?),
        OutputFormat::Text => {
            for (index, prompt) in prompts.iter().enumerate() {
                println!("{}. [{}] {}", index + 1, prompt.kind, prompt.question_text);
                if !quiet {
                    println!("   expected: {}", prompt.expected_answer);
                    if !prompt.acceptable_answers.is_empty() {
                        println!("   acceptable: {}", prompt.acceptable_answers.join(", "));
                    }
                }
            }
        }
    }
    Ok(())
}

fn cmd_profile_items(
    profile_path: &Path,
    seed: Option<u64>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let profile: PersonalProfile = read_json(profile_path)?;
    let min_fields = Config::load()?.session.min_profile_fields;
    let filled = profile.filled_count();
    if filled < min_fields {
        anyhow::bail!(
            "At least {} filled profile fields required. You have {}.",
            min_fields,
            filled
        );
    }
    let mut rng = seeded_rng(seed);
    let items = profile::generate_items(&profile, &mut rng);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        OutputFormat::Text => {
            for (index, item) in items.iter().enumerate() {
                println!("{}. [{}] {}", index + 1, item.field_label, item.question_text);
                if !quiet {
                    println!("   teach: {}", item.teach_text);
                    println!("   expected: {}", item.expected_answer);
                    println!("   hint: {}", item.hint_text);
                }
            }
        }
    }
    Ok(())
}

fn cmd_session_stats(responses_path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let responses: Vec<PromptResponse> = read_json(responses_path)?;
    let stats = SessionStatistics::from_responses(&responses)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Session summary:");
            println!("  Prompts answered: {}", stats.total_prompts);
            println!(
                "  Correct: {} ({} via partial match)",
                stats.total_correct, stats.total_partial
            );
            println!("  Accuracy: {:.1}%", stats.accuracy_percentage);
            println!(
                "  Average response time: {:.0} ms",
                stats.average_response_time_ms
            );
            println!(
                "  Average correctness score: {:.2}",
                stats.average_correctness_score
            );
            println!("  By kind:");
            for (kind, breakdown) in &stats.by_kind {
                println!("    {}: {}/{}", kind, breakdown.correct, breakdown.total);
            }
        }
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.list()? {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
