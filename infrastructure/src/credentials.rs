//! Bearer token lookup
//!
//! The token is resolved once at startup. Sources, first match wins:
//!
//! 1. The environment variable named by `endpoint.api_key_env`
//! 2. `endpoint.api_key` in the loaded configuration
//! 3. `asu_api.asu_api_key` in the secrets file (`endpoint.secrets_file`)

use crate::config::FileEndpointConfig;
use figment::{
    Figment,
    providers::{Format, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const SECRETS_KEY: &str = "asu_api.asu_api_key";

/// Errors that can occur while resolving the bearer token
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(
        "No API key found: set ${env_var}, `endpoint.api_key`, or `asu_api.asu_api_key` in {}",
        .secrets_file.display()
    )]
    Missing {
        env_var: String,
        secrets_file: PathBuf,
    },

    #[error("Failed to read secrets file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: Box<figment::Error>,
    },
}

/// Bearer token for the query endpoint
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolve the bearer token from the process environment and config.
pub fn resolve_api_key(endpoint: &FileEndpointConfig) -> Result<ApiKey, CredentialError> {
    resolve_api_key_with(endpoint, |name| std::env::var(name).ok())
}

/// Resolve the bearer token with a custom environment lookup.
pub fn resolve_api_key_with(
    endpoint: &FileEndpointConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ApiKey, CredentialError> {
    if let Some(key) = non_empty(env(&endpoint.api_key_env)) {
        debug!(source = "env", var = %endpoint.api_key_env, "API key resolved");
        return Ok(ApiKey::new(key));
    }

    if let Some(key) = non_empty(endpoint.api_key.clone()) {
        debug!(source = "config", "API key resolved");
        return Ok(ApiKey::new(key));
    }

    if let Some(key) = non_empty(read_secrets_file(&endpoint.secrets_file)?) {
        debug!(source = "secrets_file", path = %endpoint.secrets_file.display(), "API key resolved");
        return Ok(ApiKey::new(key));
    }

    Err(CredentialError::Missing {
        env_var: endpoint.api_key_env.clone(),
        secrets_file: endpoint.secrets_file.clone(),
    })
}

fn read_secrets_file(path: &Path) -> Result<Option<String>, CredentialError> {
    if !path.exists() {
        return Ok(None);
    }

    match Figment::from(Toml::file(path)).extract_inner::<String>(SECRETS_KEY) {
        Ok(key) => Ok(Some(key)),
        Err(e) if e.missing() => Ok(None),
        Err(e) => Err(CredentialError::Unreadable {
            path: path.to_path_buf(),
            source: Box::new(e),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
