//! Chat-completion relay.
//!
//! Thin client for an OpenAI-compatible `/chat/completions` endpoint. Each
//! call is a single request/response exchange; provider failures propagate
//! to the caller with no retry.

use crate::config::OpenAiSettings;
use anyhow::anyhow;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

pub struct CompletionClient {
    client: Client,
    settings: OpenAiSettings,
}

impl CompletionClient {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Text-only completion. Returns the first choice's message content, or
    /// `None` when the provider returned an empty message.
    pub async fn generate_text(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<Option<String>, AppError> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(prompt.to_string()),
                },
            ],
            max_tokens: None,
            temperature: None,
        };

        self.send(request).await
    }

    /// Multimodal completion pairing a text instruction with a hosted image
    /// URL, bounded in output length and sampled at a fixed temperature.
    pub async fn analyze_image(
        &self,
        system: &str,
        instruction: &str,
        image_url: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Option<String>, AppError> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: instruction.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image_url.to_string(),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
        };

        self.send(request).await
    }

    async fn send(&self, request: ChatRequest) -> Result<Option<String>, AppError> {
        let url = format!("{}/chat/completions", self.settings.base_url);

        tracing::debug!(model = %request.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.settings.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Completion request failed: {}", e);
                AppError::UpstreamError(anyhow!("Completion request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(anyhow!(
                "Completion API error {}: {}",
                status,
                error_text
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            AppError::UpstreamError(anyhow!("Failed to parse completion response: {}", e))
        })?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty()))
    }
}

// ============================================================================
// Chat API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
