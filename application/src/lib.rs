//! Application layer for packvote
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    preference_repository::{PreferenceRepository, RepositoryError},
    progress::{NoProgress, PlanningPhase, ProgressNotifier},
    transcript::{NoTranscript, TranscriptEvent, TranscriptEventKind, TranscriptLogger},
};
pub use use_cases::clear_group::ClearGroupUseCase;
pub use use_cases::generate_plan::{
    GeneratePlanError, GeneratePlanInput, GeneratePlanOutput, GeneratePlanUseCase,
};
pub use use_cases::group_locks::GroupLocks;
pub use use_cases::submit_preference::{SubmitPreferenceError, SubmitPreferenceUseCase};
