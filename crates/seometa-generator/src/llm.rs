//! Chat-completions client for the generation service.

use std::time::Duration;

use seometa_core::AppConfig;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// OpenAI-compatible `POST {base}/chat/completions` client.
///
/// Sends one system and one user message and returns the first choice's
/// text. A single attempt per call; retrying is the caller's business.
pub struct ChatClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    /// Creates a client for the service rooted at `base_url`
    /// (e.g. `https://api.openai.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            temperature,
        })
    }

    /// Creates a client from `config`, or `None` when no API key is set.
    ///
    /// # Errors
    ///
    /// See [`ChatClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, GenerationError> {
        config
            .openai_api_key
            .as_deref()
            .map(|key| {
                Self::new(
                    &config.openai_base_url,
                    key,
                    &config.openai_model,
                    config.openai_temperature,
                    config.http_timeout_secs,
                    config.http_connect_timeout_secs,
                )
            })
            .transpose()
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `system` and `user` messages and returns the trimmed reply text.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Http`] on network failure, timeout, or an
    ///   undecodable response body.
    /// - [`GenerationError::ServiceStatus`] on a non-2xx status (quota,
    ///   auth, outage).
    /// - [`GenerationError::EmptyCompletion`] when the reply has no text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyCompletion)
    }
}
