//! Model value object identifying the remote model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Provider used when a model string carries no `provider/` prefix.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Model name used when nothing is configured.
pub const DEFAULT_MODEL_NAME: &str = "gpt4o_mini";

/// Remote model identifier (Value Object)
///
/// The query endpoint routes on a provider and a model name, so both travel
/// together. The string form is `provider/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    provider: String,
    name: String,
}

impl Model {
    pub fn new(provider: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            name: name.into(),
        }
    }

    /// Provider routed to by the endpoint (e.g. `openai`)
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Model name within the provider (e.g. `gpt4o_mini`)
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Model {
    /// Returns the default model (openai/gpt4o_mini)
    fn default() -> Self {
        Model::new(DEFAULT_PROVIDER, DEFAULT_MODEL_NAME)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.name)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    /// Parses `provider/name`, or a bare `name` under the default provider.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.split_once('/') {
            Some((provider, name)) if !provider.is_empty() => Model::new(provider, name),
            Some((_, name)) => Model::new(DEFAULT_PROVIDER, name),
            None => Model::new(DEFAULT_PROVIDER, s),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let model = Model::new("anthropic", "claude3_haiku");
        let parsed: Model = model.to_string().parse().unwrap();
        assert_eq!(model, parsed);
    }

    #[test]
    fn test_bare_name_uses_default_provider() {
        let model: Model = "gpt4o".parse().unwrap();
        assert_eq!(model.provider(), "openai");
        assert_eq!(model.name(), "gpt4o");
    }

    #[test]
    fn test_model_default() {
        let model = Model::default();
        assert_eq!(model.to_string(), "openai/gpt4o_mini");
    }

    #[test]
    fn test_model_serde_as_string() {
        let json = serde_json::to_string(&Model::default()).unwrap();
        assert_eq!(json, "\"openai/gpt4o_mini\"");
        let model: Model = serde_json::from_str("\"gcp/gemini\"").unwrap();
        assert_eq!(model, Model::new("gcp", "gemini"));
    }
}
