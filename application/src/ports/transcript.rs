//! Port for the planning transcript
//!
//! Every attempt at a group plan leaves a trail: the prompt sent, what the
//! engine answered (or why it could not), and whether the answer passed
//! validation. [`TranscriptLogger`] receives that trail as typed events so an
//! adapter can persist it, separately from `tracing` diagnostics.

use packvote_domain::GroupId;
use serde_json::Value;
use std::fmt;

/// Step of a planning attempt that produced a transcript event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptEventKind {
    /// Prompt handed to the engine
    PlanRequested,
    /// Engine call failed before producing text
    UpstreamFailure,
    /// Raw engine text, before validation
    EngineResponse,
    /// Response passed validation
    PlanAccepted,
    /// Response failed validation
    PlanRejected,
}

impl TranscriptEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptEventKind::PlanRequested => "plan_requested",
            TranscriptEventKind::UpstreamFailure => "upstream_failure",
            TranscriptEventKind::EngineResponse => "engine_response",
            TranscriptEventKind::PlanAccepted => "plan_accepted",
            TranscriptEventKind::PlanRejected => "plan_rejected",
        }
    }

    /// Whether this event closes an attempt
    pub fn ends_attempt(&self) -> bool {
        !matches!(
            self,
            TranscriptEventKind::PlanRequested | TranscriptEventKind::EngineResponse
        )
    }
}

impl fmt::Display for TranscriptEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a group's planning transcript
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    pub kind: TranscriptEventKind,
    pub group: GroupId,
    /// 1-based attempt number within one generate call
    pub attempt: u32,
    /// Step-specific details (prompt, raw text, rejection reason...)
    pub details: Value,
}

impl TranscriptEvent {
    pub fn new(kind: TranscriptEventKind, group: &GroupId, attempt: u32, details: Value) -> Self {
        Self {
            kind,
            group: group.clone(),
            attempt,
            details,
        }
    }
}

/// Sink for transcript events.
///
/// `record` never fails; adapters drop what they cannot write.
pub trait TranscriptLogger: Send + Sync {
    fn record(&self, event: TranscriptEvent);
}

/// Discards every event (no transcript configured)
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn record(&self, _event: TranscriptEvent) {}
}
