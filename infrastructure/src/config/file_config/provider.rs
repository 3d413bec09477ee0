//! Planning engine configuration from TOML (`[provider]` section)

use packvote_domain::Model;
use serde::{Deserialize, Serialize};

/// Gemini provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Model id (default: "gemini-2.5-flash")
    pub model: String,
    /// API root (default: "https://generativelanguage.googleapis.com")
    pub base_url: String,
    /// Environment variable holding the API key (default: "GEMINI_API_KEY")
    pub api_key_env: String,
    /// Inline API key; prefer the environment variable
    pub api_key: Option<String>,
    /// Seconds to wait for one engine response
    pub timeout_seconds: u64,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: 60,
            temperature: 0.7,
        }
    }
}

impl FileProviderConfig {
    pub fn parse_model(&self) -> Model {
        let Ok(model) = self.model.trim().parse::<Model>();
        model
    }

    /// Inline key first, then the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}
