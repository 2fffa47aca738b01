//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for socratic-chat
#[derive(Parser, Debug)]
#[command(name = "socratic-chat")]
#[command(author, version, about = "Terminal chat client that maps the conversation as a topic graph")]
#[command(long_about = r#"
socratic-chat sends each question to a hosted language-model endpoint,
streams the answer word by word, and links every question to its answer
in a topic graph that can be printed as text, JSON or Graphviz DOT.

Configuration files are loaded from (in priority order):
1. SOCRATIC_* environment variables (nested keys split on "__")
2. --config <path>     Explicit config file
3. ./socratic.toml     Project-level config
4. ~/.config/socratic-chat/config.toml   Global config

The bearer token is read from $ASU_API_KEY, then `endpoint.api_key`,
then `[asu_api] asu_api_key` in .socratic/secrets.toml.

Example:
  socratic-chat "What is entropy?"
  socratic-chat --chat -m anthropic/claude3_haiku
  socratic-chat --chat --temperature 0.2 --system-prompt "You are a Socratic tutor."
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model as `provider/name` or just `name`
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long, value_name = "FLOAT")]
    pub temperature: Option<f32>,

    /// Maximum number of tokens in a response
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// System prompt sent with every query
    #[arg(long, value_name = "TEXT")]
    pub system_prompt: Option<String>,

    /// Query endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Pause between streamed words in milliseconds
    #[arg(long, value_name = "MS")]
    pub pacing: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shot_question() {
        let cli = Cli::try_parse_from(["socratic-chat", "What is entropy?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is entropy?"));
        assert!(!cli.chat);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_chat_mode_with_overrides() {
        let cli = Cli::try_parse_from([
            "socratic-chat",
            "--chat",
            "-m",
            "anthropic/claude3_haiku",
            "--temperature",
            "0.2",
            "--max-tokens",
            "300",
            "-vv",
        ])
        .unwrap();
        assert!(cli.chat);
        assert_eq!(cli.model.as_deref(), Some("anthropic/claude3_haiku"));
        assert_eq!(cli.temperature, Some(0.2));
        assert_eq!(cli.max_tokens, Some(300));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["socratic-chat", "--timeout", "soon"]).is_err());
    }
}
