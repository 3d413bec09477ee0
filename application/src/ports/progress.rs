//! Progress notification port
//!
//! Defines the interface for reporting progress while a plan is generated.

/// Stage of the plan generation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningPhase {
    /// Reducing member preferences into a group profile
    Aggregation,
    /// Waiting for the planning engine
    Generation,
    /// Checking the engine response
    Validation,
}

impl PlanningPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningPhase::Aggregation => "Aggregating preferences",
            PlanningPhase::Generation => "Generating plan",
            PlanningPhase::Validation => "Validating plan",
        }
    }
}

impl std::fmt::Display for PlanningPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during plan generation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts; `attempt` is 1-based
    fn on_phase_start(&self, phase: &PlanningPhase, attempt: u32);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &PlanningPhase, success: bool);

    /// Called before a rejected or failed request is re-issued
    fn on_retry(&self, _next_attempt: u32, _max_attempts: u32, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &PlanningPhase, _attempt: u32) {}
    fn on_phase_complete(&self, _phase: &PlanningPhase, _success: bool) {}
}
