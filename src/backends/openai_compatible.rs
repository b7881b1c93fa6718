//! Client for OpenAI-compatible chat-completions endpoints.
//!
//! Groq, OpenAI and DeepSeek all accept the same request shape, so a single
//! client covers every [`Backend`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::builder::Backend;
use crate::chat::{ChatMessage, ChatOptions, ChatProvider, ChatResponse};
use crate::error::JudgeError;

/// Configuration for the OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAICompatibleConfig {
    /// Backend this client talks to.
    pub backend: Backend,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Default maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Default sampling temperature.
    pub temperature: Option<f32>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// System prompt to guide model behavior.
    pub system: Option<String>,
}

/// Client for an OpenAI-compatible chat API.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAICompatible {
    pub config: Arc<OpenAICompatibleConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionChoice {
    message: ChatCompletionMsg,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionMsg {
    #[serde(default)]
    content: Option<String>,
}

impl std::fmt::Display for ChatCompletionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

impl ChatResponse for ChatCompletionResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
    }
}

impl OpenAICompatible {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        backend: Backend,
        api_key: SecretString,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Result<Self, JudgeError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let client = builder.build()?;
        Ok(Self::with_client(
            client,
            OpenAICompatibleConfig {
                backend,
                api_key,
                base_url: base_url.unwrap_or_else(|| backend.default_base_url().to_string()),
                model: model.unwrap_or_else(|| backend.default_model().to_string()),
                max_tokens,
                temperature,
                timeout_seconds,
                system,
            },
        ))
    }

    /// Creates a client with a custom HTTP client.
    pub fn with_client(client: Client, config: OpenAICompatibleConfig) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatible {
    async fn chat_with_options(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<Box<dyn ChatResponse>, JudgeError> {
        let provider = self.config.backend.name();
        let api_key = self.config.api_key.expose_secret();
        if api_key.is_empty() {
            return Err(JudgeError::AuthError(format!("Missing {provider} API key")));
        }

        let mut wire_msgs: Vec<ChatCompletionMessage> = messages
            .iter()
            .map(|m| ChatCompletionMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();

        if let Some(system) = &self.config.system {
            wire_msgs.insert(
                0,
                ChatCompletionMessage {
                    role: "system",
                    content: system,
                },
            );
        }

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: wire_msgs,
            temperature: options.temperature.or(self.config.temperature),
            max_tokens: options.max_tokens.or(self.config.max_tokens),
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{provider} request payload: {json}");
            }
        }

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("{provider} HTTP status: {status}");

        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => JudgeError::AuthError(format!("{provider} rejected the API key")),
                _ => JudgeError::ProviderError(format!(
                    "{provider} returned {status}: {error_text}"
                )),
            });
        }

        let raw = resp.text().await?;
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&raw).map_err(|err| JudgeError::ResponseFormatError {
                message: format!("Failed to decode {provider} response: {err}"),
                raw_response: raw.clone(),
            })?;

        if parsed.choices.is_empty() {
            return Err(JudgeError::ResponseFormatError {
                message: format!("{provider} returned no choices"),
                raw_response: raw,
            });
        }

        Ok(Box::new(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard, system: Option<String>) -> OpenAICompatible {
        OpenAICompatible::new(
            Backend::Groq,
            SecretString::new("gsk-test".to_string()),
            Some(server.url()),
            Some("test-model".to_string()),
            Some(1500),
            Some(0.5),
            None,
            system,
        )
        .expect("client")
    }

    #[tokio::test]
    async fn chat_posts_request_and_reads_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer gsk-test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "test-model",
                "temperature": 0.1,
                "max_tokens": 1500,
                "stream": false,
                "messages": [{"role": "user", "content": "hola"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"PUNTUACIÓN TEXTO 1: 50"}}]}"#)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let messages = [ChatMessage::user().content("hola").build()];
        let response = client
            .chat_with_options(&messages, &ChatOptions::new().temperature(0.1))
            .await
            .expect("chat succeeds");

        assert_eq!(response.text().as_deref(), Some("PUNTUACIÓN TEXTO 1: 50"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn system_prompt_is_sent_first() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "Eres un evaluador"},
                    {"role": "user", "content": "hola"}
                ]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("Eres un evaluador".to_string()));
        let messages = [ChatMessage::user().content("hola").build()];
        client.chat(&messages).await.expect("chat succeeds");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_becomes_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"rate limit reached"}}"#)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let messages = [ChatMessage::user().content("hola").build()];
        let err = client.chat(&messages).await.err().expect("error");

        match err {
            JudgeError::ProviderError(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("rate limit reached"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_status_becomes_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let messages = [ChatMessage::user().content("hola").build()];
        let err = client.chat(&messages).await.err().expect("error");
        assert!(matches!(err, JudgeError::AuthError(_)));
    }

    #[tokio::test]
    async fn malformed_body_becomes_response_format_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(&server, None);
        let messages = [ChatMessage::user().content("hola").build()];
        let err = client.chat(&messages).await.err().expect("error");

        match err {
            JudgeError::ResponseFormatError { raw_response, .. } => {
                assert_eq!(raw_response, "not json")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let messages = [ChatMessage::user().content("hola").build()];
        assert!(client.chat(&messages).await.is_err());
    }
}
