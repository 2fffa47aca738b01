//! Wire format of the query endpoint

use serde::Serialize;
use socratic_application::QueryError;
use socratic_domain::{Model, ModelParams};

/// Body of the outbound POST
///
/// History and semantic caching are always disabled: every query is
/// answered on its own.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub model_provider: &'a str,
    pub model_name: &'a str,
    pub model_params: &'a ModelParams,
    pub query: &'a str,
    pub enable_history: bool,
    pub semantic_caching: bool,
}

impl<'a> QueryRequest<'a> {
    pub fn new(query: &'a str, model: &'a Model, params: &'a ModelParams) -> Self {
        Self {
            model_provider: model.provider(),
            model_name: model.name(),
            model_params: params,
            query,
            enable_history: false,
            semantic_caching: false,
        }
    }
}

/// Pull the `response` text out of a successful response body.
pub fn extract_response(body: &str) -> Result<String, QueryError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| QueryError::MalformedResponse(format!("body is not JSON: {e}")))?;

    match value.get("response") {
        Some(serde_json::Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(QueryError::MalformedResponse(format!(
            "`response` is not a string: {other}"
        ))),
        None => Err(QueryError::MalformedResponse(
            "missing `response` field".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let model = Model::default();
        let params = ModelParams::default();
        let body = serde_json::to_value(QueryRequest::new("What is entropy?", &model, &params))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "model_provider": "openai",
                "model_name": "gpt4o_mini",
                "model_params": {
                    "temperature": 0.7f32,
                    "max_tokens": 1500,
                    "system_prompt": "You are a helpful assistant."
                },
                "query": "What is entropy?",
                "enable_history": false,
                "semantic_caching": false
            })
        );
    }

    #[test]
    fn test_extract_response() {
        let text = extract_response(r#"{"response": "Entropy measures disorder.", "usage": {}}"#)
            .unwrap();
        assert_eq!(text, "Entropy measures disorder.");
    }

    #[test]
    fn test_missing_response_field() {
        let err = extract_response(r#"{"answer": "x"}"#).unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(ref m) if m.contains("missing")));
    }

    #[test]
    fn test_non_string_response_field() {
        let err = extract_response(r#"{"response": null}"#).unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_json_body() {
        let err = extract_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse(ref m) if m.contains("not JSON")));
    }
}
