//! Gemini session.
//!
//! Provides [`GeminiSession`] which implements [`LlmSession`]. Each `send`
//! is an independent single-turn `generateContent` call carrying the
//! session's system prompt.

use crate::gemini::config::GeminiProviderConfig;
use crate::gemini::error::{GeminiError, Result};
use crate::gemini::protocol::{GenerateContentRequest, GenerateContentResponse, error_message};
use async_trait::async_trait;
use packvote_application::ports::llm_gateway::{GatewayError, LlmSession};
use packvote_domain::Model;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

pub struct GeminiSession {
    client: Client,
    config: Arc<GeminiProviderConfig>,
    model: Model,
    system_prompt: Option<String>,
}

impl GeminiSession {
    pub fn new(
        client: Client,
        config: Arc<GeminiProviderConfig>,
        model: Model,
        system_prompt: Option<String>,
    ) -> Self {
        Self {
            client,
            config,
            model,
            system_prompt,
        }
    }

    /// Send one prompt and return the raw text of the first candidate
    pub async fn generate(&self, content: &str) -> Result<String> {
        let request = GenerateContentRequest::json_reply(
            self.system_prompt.as_deref(),
            content,
            self.config.temperature,
        );
        let url = self.config.endpoint(self.model.as_str());
        debug!(model = %self.model, bytes = content.len(), "Calling generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GeminiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GeminiError::InvalidResponse(e.to_string()))?;
        let text = parsed.into_text()?;
        debug!(model = %self.model, bytes = text.len(), "Gemini responded");
        Ok(text)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> std::result::Result<String, GatewayError> {
        self.generate(content).await.map_err(GatewayError::from)
    }
}
