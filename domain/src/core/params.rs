//! Sampling parameters sent with each query

use serde::{Deserialize, Serialize};

/// Model parameters (Value Object)
///
/// Serialized as the `model_params` object of the outbound request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Sampling randomness
    pub temperature: f32,
    /// Response length cap in tokens
    pub max_tokens: u32,
    /// Fixed instruction prefix
    pub system_prompt: String,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1500,
            system_prompt: "You are a helpful assistant.".to_string(),
        }
    }
}

impl ModelParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ModelParams::default();
        assert_eq!(params.max_tokens, 1500);
        assert_eq!(params.system_prompt, "You are a helpful assistant.");
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let params: ModelParams = serde_json::from_str(r#"{"max_tokens": 200}"#).unwrap();
        assert_eq!(params.max_tokens, 200);
        assert_eq!(params.system_prompt, "You are a helpful assistant.");
    }
}
