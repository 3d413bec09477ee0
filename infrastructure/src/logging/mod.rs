//! Logging infrastructure: the structured planning transcript.
//!
//! Provides [`JsonlPlanningLogger`], a JSONL file writer that implements
//! the [`TranscriptLogger`](packvote_application::TranscriptLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlPlanningLogger;
