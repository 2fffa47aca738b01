//! Logging decorator for any [`QueryClient`]

use async_trait::async_trait;
use socratic_application::{QueryClient, QueryError};
use socratic_domain::{Model, ModelParams};
use std::sync::Arc;
use std::time::Instant;

/// Logs model, latency and outcome of every query sent through `inner`.
pub struct LoggingQueryClient {
    inner: Arc<dyn QueryClient>,
}

impl LoggingQueryClient {
    pub fn new(inner: Arc<dyn QueryClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl QueryClient for LoggingQueryClient {
    async fn query(
        &self,
        text: &str,
        model: &Model,
        params: &ModelParams,
    ) -> Result<String, QueryError> {
        let start = Instant::now();
        let result = self.inner.query(text, model, params).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %model,
                    duration_ms = %duration.as_millis(),
                    query_len = text.len(),
                    response_len = response.len(),
                    "Query completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %model,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind(),
                    error = %e,
                    "Query failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl QueryClient for Echo {
        async fn query(
            &self,
            text: &str,
            _model: &Model,
            _params: &ModelParams,
        ) -> Result<String, QueryError> {
            if text == "fail" {
                Err(QueryError::Remote { status_code: 503 })
            } else {
                Ok(text.to_uppercase())
            }
        }
    }

    #[tokio::test]
    async fn test_passes_results_through() {
        let client = LoggingQueryClient::new(Arc::new(Echo));
        let model = Model::default();
        let params = ModelParams::default();

        assert_eq!(client.query("hi", &model, &params).await, Ok("HI".to_string()));
        assert_eq!(
            client.query("fail", &model, &params).await,
            Err(QueryError::Remote { status_code: 503 })
        );
    }
}
