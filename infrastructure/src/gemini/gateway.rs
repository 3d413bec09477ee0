//! Gemini LLM Gateway implementation

use crate::gemini::config::GeminiProviderConfig;
use crate::gemini::error::Result;
use crate::gemini::session::GeminiSession;
use async_trait::async_trait;
use packvote_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use packvote_domain::Model;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// LLM Gateway implementation for the Gemini API
pub struct GeminiLlmGateway {
    client: Client,
    config: Arc<GeminiProviderConfig>,
}

impl GeminiLlmGateway {
    /// Build the HTTP client; no request is made until a session sends
    pub fn new(config: GeminiProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("packvote/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(base_url = %config.base_url, "GeminiLlmGateway initialized");

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &GeminiProviderConfig {
        &self.config
    }

    fn session(&self, model: &Model, system_prompt: Option<String>) -> GeminiSession {
        if !model.is_gemini() {
            warn!(model = %model, "Model id does not look like a Gemini model");
        }
        GeminiSession::new(
            self.client.clone(),
            Arc::clone(&self.config),
            model.clone(),
            system_prompt,
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    async fn create_session(
        &self,
        model: &Model,
    ) -> std::result::Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(self.session(model, None)))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> std::result::Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(self.session(model, Some(system_prompt.to_string()))))
    }

    async fn available_models(&self) -> std::result::Result<Vec<Model>, GatewayError> {
        // No listing call is made; these are the releases the prompts are tuned for
        Ok(vec![
            Model::Gemini25Flash,
            Model::Gemini25Pro,
            Model::Gemini20Flash,
        ])
    }
}
