//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use socratic_domain::{Model, ModelParams};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Query endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://api-edplus-poc.aiml.asu.edu/queryV2";

/// Environment variable checked first for the bearer token
pub const DEFAULT_API_KEY_ENV: &str = "ASU_API_KEY";

/// Secrets file checked last for the bearer token
pub const DEFAULT_SECRETS_FILE: &str = ".socratic/secrets.toml";

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("endpoint url cannot be empty")]
    EmptyEndpoint,

    #[error("temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("max_tokens cannot be 0")]
    InvalidMaxTokens,
}

/// Raw endpoint configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Query endpoint URL
    pub url: String,
    /// Bearer token (prefer the environment or the secrets file)
    pub api_key: Option<String>,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    /// Secrets file with an `[asu_api] asu_api_key = "..."` entry
    pub secrets_file: PathBuf,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            secrets_file: PathBuf::from(DEFAULT_SECRETS_FILE),
        }
    }
}

/// Raw model selection from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub provider: String,
    pub name: String,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        let model = Model::default();
        Self {
            provider: model.provider().to_string(),
            name: model.name().to_string(),
        }
    }
}

impl FileModelConfig {
    pub fn to_model(&self) -> Model {
        Model::new(self.provider.trim(), self.name.trim())
    }
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Timeout in seconds for the query call
    pub timeout_seconds: Option<u64>,
    /// Pause between displayed words, in milliseconds
    pub stream_pacing_ms: u64,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            stream_pacing_ms: 50,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while waiting for the response
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Remote endpoint and credential sources
    pub endpoint: FileEndpointConfig,
    /// Model selection
    pub model: FileModelConfig,
    /// Sampling parameters sent with every query
    pub model_params: ModelParams,
    /// Behavior settings
    pub behavior: FileBehaviorConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.behavior.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.model.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.endpoint.url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }

        let temperature = self.model_params.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::InvalidTemperature(temperature));
        }

        if self.model_params.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[endpoint]
url = "https://example.test/queryV2"
api_key_env = "MY_KEY"
secrets_file = "secrets.toml"

[model]
provider = "anthropic"
name = "claude3_haiku"

[model_params]
temperature = 0.2
max_tokens = 300
system_prompt = "You are a Socratic tutor."

[behavior]
timeout_seconds = 120
stream_pacing_ms = 0

[output]
color = false

[repl]
show_progress = false
history_file = "~/.local/share/socratic/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.url, "https://example.test/queryV2");
        assert_eq!(config.endpoint.api_key_env, "MY_KEY");
        assert_eq!(config.model.to_model(), Model::new("anthropic", "claude3_haiku"));
        assert_eq!(config.model_params.max_tokens, 300);
        assert_eq!(config.model_params.system_prompt, "You are a Socratic tutor.");
        assert_eq!(config.behavior.timeout_seconds, Some(120));
        assert_eq!(config.behavior.stream_pacing_ms, 0);
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[model]
name = "gpt4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.to_model(), Model::new("openai", "gpt4o"));
        // Defaults should apply
        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT);
        assert_eq!(config.model_params, ModelParams::default());
        assert_eq!(config.behavior.stream_pacing_ms, 50);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.model.to_model(), Model::default());
        assert_eq!(config.endpoint.api_key_env, "ASU_API_KEY");
        assert!(config.endpoint.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[behavior]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[model]
name = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_temperature_range() {
        let toml_str = r#"
[model_params]
temperature = 3.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let mut config = FileConfig::default();
        config.model_params.max_tokens = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxTokens)
        ));
    }
}
