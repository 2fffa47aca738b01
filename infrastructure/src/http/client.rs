//! `reqwest`-backed query client

use super::wire::{QueryRequest, extract_response};
use crate::credentials::ApiKey;
use async_trait::async_trait;
use reqwest::Client;
use socratic_application::{QueryClient, QueryError};
use socratic_domain::{Model, ModelParams};
use std::time::Duration;
use tracing::debug;

/// Sends each query as an authenticated JSON POST to the endpoint.
pub struct HttpQueryClient {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
}

impl HttpQueryClient {
    /// Build a client. Without a timeout the call waits as long as the
    /// service takes.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: ApiKey,
        timeout: Option<Duration>,
    ) -> Result<Self, QueryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| QueryError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::from_parts(client, endpoint, api_key))
    }

    /// Wrap an already configured `reqwest` client.
    pub fn from_parts(client: Client, endpoint: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn query(
        &self,
        text: &str,
        model: &Model,
        params: &ModelParams,
    ) -> Result<String, QueryError> {
        let request = QueryRequest::new(text, model, params);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QueryError::Transport(format!("Request timeout: {}", e))
                } else if e.is_connect() {
                    QueryError::Transport(format!("Connection failed: {}", e))
                } else {
                    QueryError::Transport(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Endpoint returned an error status");
            return Err(QueryError::Remote {
                status_code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Transport(format!("Failed to read response: {}", e)))?;

        extract_response(&body)
    }
}
