//! Infrastructure layer for packvote
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileBehaviorConfig, FileConfig, FileGroupConfig, FileLoggingConfig,
    FileOutputConfig, FileProviderConfig, FileStorageConfig,
};
pub use gemini::{
    config::GeminiProviderConfig, error::GeminiError, gateway::GeminiLlmGateway,
    session::GeminiSession,
};
pub use logging::JsonlPlanningLogger;
pub use storage::{InMemoryPreferenceRepository, JsonPreferenceRepository};
