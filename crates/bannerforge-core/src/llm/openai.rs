//! OpenAI-compatible completion provider using the Chat Completions API.
//!
//! Text only: one system message and one user message per request.

use super::provider::{ChatMessage, CompletionRequest, CompletionResponse, LlmProvider};
use crate::config::{resolve_env_var, CompletionConfig};
use crate::error::PipelineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// OpenAI provider using Chat Completions API.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_endpoint(
            api_key,
            model,
            "https://api.openai.com/v1/chat/completions",
        )
    }

    /// Create with a custom endpoint (any Chat Completions compatible service).
    pub fn with_endpoint(api_key: &str, model: &str, endpoint: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Build from the `[completion]` config section, resolving `${ENV_VAR}` keys.
    pub fn from_config(
        config: &CompletionConfig,
        model_override: Option<&str>,
    ) -> Result<Self, PipelineError> {
        let api_key =
            resolve_env_var(&config.api_key).ok_or_else(|| PipelineError::MissingApiKey {
                service: "Completion",
                hint: format!(
                    "Set completion.api_key or the variable it references ({}).",
                    config.api_key
                ),
            })?;
        let model = model_override.unwrap_or(&config.model);
        let mut provider = Self::with_endpoint(&api_key, model, &config.endpoint);
        provider.timeout = Duration::from_millis(config.timeout_ms);
        Ok(provider)
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Pull the trimmed text of the first choice out of a response body.
///
/// Any body that does not carry non-blank `choices[0].message.content`
/// counts as an empty completion.
fn parse_completion(body: &str) -> Result<(String, Option<String>), PipelineError> {
    let chat_resp: ChatResponse = serde_json::from_str(body).map_err(|e| {
        tracing::debug!("Unparseable completion body: {e}");
        PipelineError::EmptyCompletion
    })?;

    let text = chat_resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(PipelineError::EmptyCompletion)?;

    Ok((text, chat_resp.model))
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, PipelineError> {
        let start = Instant::now();

        let body = ChatRequest {
            model: &self.model,
            messages: &request.messages,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| PipelineError::Network {
                message: format!("Completion request failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::RequestFailed {
                status: status.as_u16(),
                message: text,
            });
        }

        let text = resp.text().await.map_err(|e| PipelineError::Network {
            message: format!("Failed to read completion body: {e}"),
        })?;
        let (text, model) = parse_completion(&text)?;

        Ok(CompletionResponse {
            text,
            model: model.unwrap_or_else(|| self.model.clone()),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletionConfig;

    #[test]
    fn test_parse_completion_trims_first_choice() {
        let body = r#"{
            "model": "gpt-4-0613",
            "choices": [
                {"message": {"role": "assistant", "content": "  A misty pine forest at dawn.  \n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let (text, model) = parse_completion(body).unwrap();
        assert_eq!(text, "A misty pine forest at dawn.");
        assert_eq!(model.as_deref(), Some("gpt-4-0613"));
    }

    #[test]
    fn test_parse_completion_empty_choices() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCompletion));
    }

    #[test]
    fn test_parse_completion_null_or_blank_content() {
        let null = r#"{"choices": [{"message": {"content": null}}]}"#;
        assert!(matches!(
            parse_completion(null),
            Err(PipelineError::EmptyCompletion)
        ));

        let blank = r#"{"choices": [{"message": {"content": "   "}}]}"#;
        assert!(matches!(
            parse_completion(blank),
            Err(PipelineError::EmptyCompletion)
        ));
    }

    #[test]
    fn test_parse_completion_other_shapes() {
        assert!(matches!(
            parse_completion("not json"),
            Err(PipelineError::EmptyCompletion)
        ));
        assert!(matches!(
            parse_completion(r#"{"error": {"message": "x"}}"#),
            Err(PipelineError::EmptyCompletion)
        ));
    }

    #[test]
    fn test_chat_request_body_shape() {
        let prompt = crate::types::Prompt::parse("castle").unwrap();
        let request = CompletionRequest::enhance("sys", &prompt);
        let body = ChatRequest {
            model: "gpt-4",
            messages: &request.messages,
        };
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Enhance this description: castle");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = CompletionConfig {
            api_key: "${DEFINITELY_NOT_SET_BF_OPENAI}".to_string(),
            ..CompletionConfig::default()
        };
        let err = OpenAiProvider::from_config(&config, None).err().unwrap();
        assert!(matches!(err, PipelineError::MissingApiKey { .. }));
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let config = CompletionConfig {
            api_key: "sk-test".to_string(),
            timeout_ms: 1500,
            ..CompletionConfig::default()
        };
        let provider = OpenAiProvider::from_config(&config, Some("gpt-4o")).unwrap();
        assert_eq!(provider.model, "gpt-4o");
        assert_eq!(provider.timeout(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let provider = OpenAiProvider::with_endpoint("sk-test", "gpt-4", "http://127.0.0.1:9/v1");
        let prompt = crate::types::Prompt::parse("castle").unwrap();
        let err = provider
            .complete(&CompletionRequest::enhance("sys", &prompt))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Network { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failed() {
        let (base, server) =
            crate::testing::serve_once(401, r#"{"error": {"message": "bad key"}}"#).await;
        let endpoint = format!("{base}/v1/chat/completions");
        let provider = OpenAiProvider::with_endpoint("sk-test", "gpt-4", &endpoint);
        let prompt = crate::types::Prompt::parse("castle").unwrap();

        let err = provider
            .complete(&CompletionRequest::enhance("sys", &prompt))
            .await
            .unwrap_err();
        match err {
            PipelineError::RequestFailed { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("bad key"));
            }
            other => panic!("Expected RequestFailed, got {other:?}"),
        }

        let request = server.await.unwrap();
        assert!(request.head.starts_with("POST /v1/chat/completions"));
        assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
    }

    #[tokio::test]
    async fn test_complete_sends_messages_and_reads_choice() {
        let (base, server) = crate::testing::serve_once(
            200,
            r#"{"model": "gpt-4-0613", "choices": [{"message": {"content": " A castle at dusk. "}}]}"#,
        )
        .await;
        let provider = OpenAiProvider::with_endpoint("sk-test", "gpt-4", &base);
        let prompt = crate::types::Prompt::parse("castle").unwrap();

        let response = provider
            .complete(&CompletionRequest::enhance("sys", &prompt))
            .await
            .unwrap();
        assert_eq!(response.text, "A castle at dusk.");
        assert_eq!(response.model, "gpt-4-0613");

        let body = server.await.unwrap().json();
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Enhance this description: castle");
    }
}
