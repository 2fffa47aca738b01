//! Query client port
//!
//! Defines the interface for sending a single query to the remote
//! text-generation service.

use async_trait::async_trait;
use socratic_domain::{Model, ModelParams};
use thiserror::Error;

/// Errors that can occur during a query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The service could not be reached, timed out, or the body could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Remote service returned status {status_code}")]
    Remote { status_code: u16 },

    /// The service answered successfully but without the expected payload
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl QueryError {
    /// Short label used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Transport(_) => "transport",
            QueryError::Remote { .. } => "remote",
            QueryError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Client for the remote text-generation service
///
/// Each call performs exactly one request and never retries. No history
/// is sent: every query stands alone. Implementations (adapters) live in
/// the infrastructure layer.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Send `text` to `model` and return the generated response text
    async fn query(
        &self,
        text: &str,
        model: &Model,
        params: &ModelParams,
    ) -> Result<String, QueryError>;
}
