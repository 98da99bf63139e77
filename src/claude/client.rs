//! Claude API client implementation.

use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ClaudeError, LanguageModel, REQUEST_TIMEOUT};

/// Model used when no `--model` override is given.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-latest";

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const MAX_TOKENS: i32 = 1024;

/// Claude API request message.
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Claude API request body.
#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: i32,
    messages: Vec<Message>,
}

/// Claude API response content.
#[derive(Deserialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    text: String,
}

/// Claude API response.
#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<Content>,
}

/// Language model backed by the Anthropic Messages API.
#[derive(Debug)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeClient {
    /// Creates a client with the API key taken from the environment.
    ///
    /// Checks `CLAUDE_API_KEY` first, then `ANTHROPIC_API_KEY`. A missing
    /// key is a configuration error reported before any workflow runs.
    pub fn from_env(model: Option<String>) -> Result<Self> {
        let api_key = std::env::var("CLAUDE_API_KEY")
            .or_else(|_| std::env::var("ANTHROPIC_API_KEY"))
            .map_err(|_| ClaudeError::ApiKeyNotFound)?;

        Self::new(model.unwrap_or_else(|| DEFAULT_MODEL.to_string()), api_key)
    }

    /// Creates a client with an explicit model and API key.
    pub fn new(model: String, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: ANTHROPIC_API_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl LanguageModel for ClaudeClient {
    fn query<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            debug!(prompt_len = prompt.len(), model = %self.model, "preparing Claude API request");

            let request = ClaudeRequest {
                model: self.model.clone(),
                max_tokens: MAX_TOKENS,
                messages: vec![Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                }],
            };

            let url = format!("{}/v1/messages", self.base_url);
            info!(url = %url, model = %self.model, "sending request to Claude API");

            let response = self
                .client
                .post(&url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .header("content-type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| ClaudeError::NetworkError(e.to_string()))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_else(|e| {
                    debug!("failed to read error response body: {e}");
                    String::new()
                });
                return Err(
                    ClaudeError::ApiRequestFailed(format!("HTTP {status}: {error_text}")).into(),
                );
            }

            let claude_response: ClaudeResponse = response
                .json()
                .await
                .map_err(|e| ClaudeError::InvalidResponseFormat(e.to_string()))?;

            let text = claude_response
                .content
                .first()
                .filter(|c| c.content_type == "text")
                .map(|c| c.text.clone())
                .ok_or_else(|| {
                    ClaudeError::InvalidResponseFormat("No text content in response".to_string())
                })?;

            debug!(response_len = text.len(), "received Claude API response");
            Ok(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ClaudeClient {
        ClaudeClient::new("test-model".to_string(), "test-key".to_string())
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn query_extracts_text_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "feat: add feature"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let text = client.query("write a commit message").await.unwrap();
        assert_eq!(text, "feat: add feature");
    }

    #[tokio::test]
    async fn query_surfaces_api_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid x-api-key"}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.query("prompt").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("HTTP 401"), "got: {message}");
        assert!(message.contains("invalid x-api-key"), "got: {message}");
    }

    #[tokio::test]
    async fn query_rejects_responses_without_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": []
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.query("prompt").await.unwrap_err();
        assert!(err.to_string().contains("No text content"));
    }

    #[test]
    fn from_env_requires_an_api_key() {
        std::env::remove_var("CLAUDE_API_KEY");
        std::env::remove_var("ANTHROPIC_API_KEY");
        let err = ClaudeClient::from_env(None).unwrap_err();
        assert!(err.to_string().contains("API key not found"));
    }
}
