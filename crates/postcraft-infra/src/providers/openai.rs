//! OpenAI chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use postcraft_core::ports::{ProviderError, TextGenerator};

use super::{ProviderConfig, api_error, transport_error};

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    api_base: String,
    model: String,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(
        client: reqwest::Client,
        api_key: SecretString,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Calling OpenAI");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("OpenAI", e, self.timeout))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("OpenAI response: {}", e)))?;

        // A missing message is treated as an empty completion.
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default())
    }

    /// Roughly 3.5 characters per token.
    fn count_tokens(&self, text: &str) -> u64 {
        (text.chars().count() as u64 * 2).div_ceil(7)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base: String) -> OpenAiProvider {
        let config = ProviderConfig {
            api_key: None,
            api_base: base,
            model: "gpt-4.1-nano".to_string(),
        };
        OpenAiProvider::new(
            reqwest::Client::new(),
            SecretString::from("test-key".to_string()),
            &config,
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_generate_text_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4.1-nano",
                "max_tokens": 1000,
                "messages": [{"role": "user", "content": "Write a post"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "[\"Post\"]"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(server.uri())
            .generate_text("Write a post")
            .await
            .unwrap();
        assert_eq!(text, "[\"Post\"]");
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let text = provider(server.uri()).generate_text("hi").await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_rate_limited_upstream_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = provider(server.uri()).generate_text("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_slow_upstream_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let config = ProviderConfig {
            api_key: None,
            api_base: server.uri(),
            model: "gpt-4.1-nano".to_string(),
        };
        let provider = OpenAiProvider::new(
            client,
            SecretString::from("k".to_string()),
            &config,
            Duration::from_millis(50),
        );

        let err = provider.generate_text("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)));
    }

    #[test]
    fn test_count_tokens_estimate() {
        let provider = provider("http://localhost".to_string());
        assert_eq!(provider.count_tokens(""), 0);
        // 7 chars / 3.5 = 2
        assert_eq!(provider.count_tokens("abcdefg"), 2);
        // 8 chars / 3.5 = 2.29 -> 3
        assert_eq!(provider.count_tokens("abcdefgh"), 3);
    }
}
