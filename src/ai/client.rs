use std::time::Duration;

use log::{error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::AiError;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Thin client over the hosted chat-completion endpoint. The reply is treated
/// as an opaque completion; callers pattern-match it tolerantly and always
/// carry a fallback.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    config: AiConfig,
}

impl CompletionClient {
    pub fn new(config: AiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::new(AiConfig::from_env())
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AiError> {
        self.complete_with(messages, 0.7, 2000).await
    }

    pub async fn complete_with(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature,
            max_tokens,
        };

        info!("Sending completion request with model: {}", self.config.model);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Completion endpoint error {}: {}", status, body);
            return Err(AiError::Service { status, body });
        }

        let reply: ChatResponse = response.json().await?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AiError::EmptyCompletion)?;

        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(AiError::EmptyCompletion);
        }

        Ok(content)
    }
}
