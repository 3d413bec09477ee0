//! Generate Plan use case
//!
//! Orchestrates the full planning flow for one group:
//! fetch records, aggregate, prompt the engine, validate, optionally clear.

use crate::config::BehaviorConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::preference_repository::{PreferenceRepository, RepositoryError};
use crate::ports::progress::{NoProgress, PlanningPhase, ProgressNotifier};
use crate::ports::transcript::{NoTranscript, TranscriptEvent, TranscriptEventKind, TranscriptLogger};
use crate::use_cases::group_locks::GroupLocks;
use packvote_domain::util::preview;
use packvote_domain::{
    Aggregation, ConsensusAggregator, DomainError, ErrorKind, GroupId, Model, Plan,
    PlanValidator, PromptTemplate,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while generating a plan
#[derive(Error, Debug)]
pub enum GeneratePlanError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Planning engine failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GeneratePlanError {
    /// Reason tag reported to callers; storage failures carry none
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            GeneratePlanError::Domain(e) => Some(e.kind()),
            GeneratePlanError::Gateway(e) => Some(e.kind()),
            GeneratePlanError::Repository(_) => None,
        }
    }
}

/// Input for the GeneratePlan use case
#[derive(Debug, Clone)]
pub struct GeneratePlanInput {
    pub group: GroupId,
    pub model: Model,
}

impl GeneratePlanInput {
    pub fn new(group: impl Into<GroupId>, model: Model) -> Self {
        Self {
            group: group.into(),
            model,
        }
    }
}

/// Result of a successful plan generation
#[derive(Debug, Clone)]
pub struct GeneratePlanOutput {
    pub group: GroupId,
    pub aggregation: Aggregation,
    pub plan: Plan,
    /// Engine calls made, including the accepted one
    pub attempts: u32,
    /// Records removed after the plan was accepted
    pub cleared: usize,
}

/// Use case for turning a group's preferences into a validated plan
pub struct GeneratePlanUseCase<G, R>
where
    G: LlmGateway + ?Sized + 'static,
    R: PreferenceRepository + ?Sized,
{
    gateway: Arc<G>,
    repository: Arc<R>,
    aggregator: ConsensusAggregator,
    behavior: BehaviorConfig,
    logger: Arc<dyn TranscriptLogger>,
    locks: Arc<GroupLocks>,
}

impl<G, R> GeneratePlanUseCase<G, R>
where
    G: LlmGateway + ?Sized + 'static,
    R: PreferenceRepository + ?Sized,
{
    pub fn new(gateway: Arc<G>, repository: Arc<R>) -> Self {
        Self {
            gateway,
            repository,
            aggregator: ConsensusAggregator::default(),
            behavior: BehaviorConfig::default(),
            logger: Arc::new(NoTranscript),
            locks: Arc::new(GroupLocks::new()),
        }
    }

    pub fn with_aggregator(mut self, aggregator: ConsensusAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Share group locks with other use cases operating on the same store
    pub fn with_locks(mut self, locks: Arc<GroupLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: GeneratePlanInput,
    ) -> Result<GeneratePlanOutput, GeneratePlanError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: GeneratePlanInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<GeneratePlanOutput, GeneratePlanError> {
        let group = input.group;
        let _guard = self.locks.acquire(&group).await;

        // Phase 1: Aggregation
        progress.on_phase_start(&PlanningPhase::Aggregation, 1);
        let records = self.repository.fetch_group(&group).await?;
        let aggregation = match self.aggregator.aggregate(&records) {
            Ok(aggregation) => aggregation,
            Err(e) => {
                progress.on_phase_complete(&PlanningPhase::Aggregation, false);
                info!(group = %group, "No preferences to plan from");
                return Err(e.into());
            }
        };
        progress.on_phase_complete(&PlanningPhase::Aggregation, true);
        info!(
            group = %group,
            members = records.len(),
            tier = %aggregation.tier,
            floor = aggregation.profile.budget_floor(),
            "Group aggregated"
        );

        let floor = aggregation.profile.budget_floor();
        let validator = PlanValidator::new(floor);
        let base_prompt = PromptTemplate::planning_request(
            &aggregation.profile,
            &aggregation.analytics,
            &records,
        );

        let max_attempts = self.behavior.attempts();
        let mut prompt = base_prompt.clone();
        let mut attempt = 0;

        // Phases 2 and 3, repeated until accepted or out of attempts
        let plan = loop {
            attempt += 1;

            progress.on_phase_start(&PlanningPhase::Generation, attempt);
            self.logger.record(TranscriptEvent::new(
                TranscriptEventKind::PlanRequested,
                &group,
                attempt,
                json!({ "model": input.model.to_string(), "prompt": prompt }),
            ));

            let raw = match self.request_plan(&input.model, prompt.clone()).await {
                Ok(raw) => {
                    progress.on_phase_complete(&PlanningPhase::Generation, true);
                    raw
                }
                Err(e) => {
                    progress.on_phase_complete(&PlanningPhase::Generation, false);
                    warn!(group = %group, attempt, error = %e, "Planning engine failed");
                    self.logger.record(TranscriptEvent::new(
                        TranscriptEventKind::UpstreamFailure,
                        &group,
                        attempt,
                        json!({ "error": e.to_string(), "transient": e.is_transient() }),
                    ));
                    if attempt < max_attempts && e.is_transient() {
                        let delay = self.behavior.backoff_for(attempt);
                        progress.on_retry(attempt + 1, max_attempts, &e.to_string());
                        debug!(?delay, "Backing off before retry");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            };

            debug!(group = %group, response = %preview(&raw, 200), "Engine responded");
            self.logger.record(TranscriptEvent::new(
                TranscriptEventKind::EngineResponse,
                &group,
                attempt,
                json!({ "raw": raw }),
            ));

            progress.on_phase_start(&PlanningPhase::Validation, attempt);
            match validator.validate(&raw) {
                Ok(plan) => {
                    progress.on_phase_complete(&PlanningPhase::Validation, true);
                    self.logger.record(TranscriptEvent::new(
                        TranscriptEventKind::PlanAccepted,
                        &group,
                        attempt,
                        json!({
                            "destination": plan.destination(),
                            "per_person_total": plan.budget_breakdown().per_person_total,
                            "recovered_with": plan.recovered_with().as_str(),
                        }),
                    ));
                    break plan;
                }
                Err(e) => {
                    progress.on_phase_complete(&PlanningPhase::Validation, false);
                    warn!(group = %group, attempt, kind = %e.kind(), "Plan rejected: {}", e);
                    self.logger.record(TranscriptEvent::new(
                        TranscriptEventKind::PlanRejected,
                        &group,
                        attempt,
                        json!({
                            "kind": e.kind().to_string(),
                            "message": e.to_string(),
                        }),
                    ));
                    if attempt < max_attempts {
                        progress.on_retry(attempt + 1, max_attempts, &e.kind().to_string());
                        prompt = format!(
                            "{}{}",
                            base_prompt,
                            PromptTemplate::retry_reminder(&e, floor)
                        );
                        continue;
                    }
                    return Err(e.into());
                }
            }
        };

        let cleared = if self.behavior.clear_after_plan {
            let removed = self.repository.clear_group(&group).await?;
            info!(group = %group, removed, "Cleared group after plan");
            removed
        } else {
            0
        };

        info!(
            group = %group,
            attempts = attempt,
            destination = plan.destination(),
            "Plan accepted"
        );

        Ok(GeneratePlanOutput {
            group,
            aggregation,
            plan,
            attempts: attempt,
            cleared,
        })
    }

    /// Call the engine on its own task, bounded by the configured timeout
    async fn request_plan(&self, model: &Model, prompt: String) -> Result<String, GatewayError> {
        let gateway = Arc::clone(&self.gateway);
        let model = model.clone();
        let mut handle = tokio::spawn(async move {
            let session = gateway
                .create_session_with_system_prompt(&model, PromptTemplate::planning_system())
                .await?;
            session.send(&prompt).await
        });

        let joined = match self.behavior.timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    handle.abort();
                    return Err(GatewayError::Timeout);
                }
            },
            None => handle.await,
        };

        joined.map_err(|e| GatewayError::Other(format!("engine task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeRepository, Reply, ScriptedGateway, goa_pair};
    use std::sync::Mutex;
    use std::time::Duration;

    const VALID_PLAN: &str = r#"{
        "destination": "Goa",
        "reason": "Everyone asked for Goa",
        "fairness_explanation": "Fits the tightest budget",
        "itinerary": ["Day 1: Beach", "Day 2: Old Goa"],
        "budget_breakdown": {"stay": 1200, "food": 800, "per_person_total": 2500},
        "optional_addons": ["Dolphin cruise"],
        "activities": ["Baga beach walk"],
        "food_suggestions": ["Fish curry"],
        "travel_tips": ["Carry sunscreen"]
    }"#;

    const OVER_BUDGET_PLAN: &str = r#"{
        "destination": "Goa",
        "reason": "r",
        "fairness_explanation": "f",
        "itinerary": [],
        "budget_breakdown": {"per_person_total": 5000},
        "optional_addons": [],
        "activities": [],
        "food_suggestions": [],
        "travel_tips": []
    }"#;

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(TranscriptEventKind, u32)>>,
    }

    impl TranscriptLogger for RecordingLogger {
        fn record(&self, event: TranscriptEvent) {
            self.events.lock().unwrap().push((event.kind, event.attempt));
        }
    }

    fn fast_behavior(attempts: u32) -> BehaviorConfig {
        BehaviorConfig::with_timeout_seconds(5)
            .with_max_attempts(attempts)
            .with_retry_backoff(Duration::from_millis(1))
    }

    fn seeded(group: &str) -> (Arc<FakeRepository>, GroupId) {
        let repo = Arc::new(FakeRepository::default());
        let group = GroupId::new(group);
        repo.seed(&group, goa_pair());
        (repo, group)
    }

    #[tokio::test]
    async fn test_valid_plan_is_returned_and_group_cleared() {
        let (repo, group) = seeded("G1");
        let gateway = Arc::new(ScriptedGateway::new(vec![Reply::text(VALID_PLAN)]));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = GeneratePlanUseCase::new(Arc::clone(&gateway), Arc::clone(&repo))
            .with_behavior(fast_behavior(1))
            .with_logger(logger.clone());

        let output = use_case
            .execute(GeneratePlanInput::new(group.clone(), Model::default()))
            .await
            .unwrap();

        assert_eq!(output.plan.destination(), "Goa");
        assert_eq!(output.attempts, 1);
        assert_eq!(output.cleared, 2);
        assert_eq!(output.aggregation.profile.min_budget, 3000.0);
        assert!(repo.records(&group).is_empty());

        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("3000.00"));
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                (TranscriptEventKind::PlanRequested, 1),
                (TranscriptEventKind::EngineResponse, 1),
                (TranscriptEventKind::PlanAccepted, 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_group_is_insufficient_members() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let use_case =
            GeneratePlanUseCase::new(Arc::clone(&gateway), Arc::new(FakeRepository::default()));

        let err = use_case
            .execute(GeneratePlanInput::new("empty", Model::default()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::InsufficientMembers));
        assert_eq!(err.to_string(), "No preferences submitted yet");
        assert!(gateway.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_budget_exceeded_without_retry_keeps_records() {
        let (repo, group) = seeded("G1");
        let gateway = Arc::new(ScriptedGateway::new(vec![Reply::text(OVER_BUDGET_PLAN)]));
        let use_case = GeneratePlanUseCase::new(gateway, Arc::clone(&repo))
            .with_behavior(fast_behavior(1));

        let err = use_case
            .execute(GeneratePlanInput::new(group.clone(), Model::default()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::BudgetExceeded));
        assert_eq!(repo.records(&group).len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_plan_retries_with_reminder() {
        let (repo, group) = seeded("G1");
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Reply::text(OVER_BUDGET_PLAN),
            Reply::text(VALID_PLAN),
        ]));
        let use_case = GeneratePlanUseCase::new(Arc::clone(&gateway), repo)
            .with_behavior(fast_behavior(3));

        let output = use_case
            .execute(GeneratePlanInput::new(group, Model::default()))
            .await
            .unwrap();

        assert_eq!(output.attempts, 2);
        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(!prompts[0].contains("IMPORTANT"));
        assert!(prompts[1].contains("IMPORTANT"));
        assert!(prompts[1].contains("Reduce costs"));
    }

    #[tokio::test]
    async fn test_upstream_failure_retries_then_succeeds() {
        let (repo, group) = seeded("G1");
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Reply::Fail(GatewayError::ConnectionError("reset".into())),
            Reply::text(VALID_PLAN),
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let use_case = GeneratePlanUseCase::new(Arc::clone(&gateway), repo)
            .with_behavior(fast_behavior(2))
            .with_logger(logger.clone());

        let output = use_case
            .execute(GeneratePlanInput::new(group, Model::default()))
            .await
            .unwrap();

        assert_eq!(output.attempts, 2);
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                (TranscriptEventKind::PlanRequested, 1),
                (TranscriptEventKind::UpstreamFailure, 1),
                (TranscriptEventKind::PlanRequested, 2),
                (TranscriptEventKind::EngineResponse, 2),
                (TranscriptEventKind::PlanAccepted, 2),
            ]
        );
        // The prompt is re-sent unchanged after a transport failure
        let prompts = gateway.prompts();
        assert_eq!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let (repo, group) = seeded("G1");
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Reply::Fail(GatewayError::Unauthorized("bad key".into())),
            Reply::text(VALID_PLAN),
        ]));
        let use_case = GeneratePlanUseCase::new(Arc::clone(&gateway), repo)
            .with_behavior(fast_behavior(3));

        let err = use_case
            .execute(GeneratePlanInput::new(group, Model::default()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::UpstreamFailure));
        assert_eq!(gateway.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_upstream_failure() {
        let (repo, group) = seeded("G1");
        let gateway = Arc::new(ScriptedGateway::new(vec![Reply::Hang]));
        let behavior = BehaviorConfig::default().with_max_attempts(1);
        let behavior = BehaviorConfig {
            timeout: Some(Duration::from_millis(20)),
            ..behavior
        };
        let use_case = GeneratePlanUseCase::new(gateway, Arc::clone(&repo)).with_behavior(behavior);

        let err = use_case
            .execute(GeneratePlanInput::new(group.clone(), Model::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, GeneratePlanError::Gateway(GatewayError::Timeout)));
        assert_eq!(err.kind(), Some(ErrorKind::UpstreamFailure));
        assert_eq!(repo.records(&group).len(), 2);
    }

    #[tokio::test]
    async fn test_records_kept_when_clearing_disabled() {
        let (repo, group) = seeded("G1");
        let gateway = Arc::new(ScriptedGateway::new(vec![Reply::text(VALID_PLAN)]));
        let use_case = GeneratePlanUseCase::new(gateway, Arc::clone(&repo))
            .with_behavior(fast_behavior(1).with_clear_after_plan(false));

        let output = use_case
            .execute(GeneratePlanInput::new(group.clone(), Model::default()))
            .await
            .unwrap();

        assert_eq!(output.cleared, 0);
        assert_eq!(repo.records(&group).len(), 2);
    }

    #[tokio::test]
    async fn test_prose_wrapped_response_is_recovered() {
        let (repo, group) = seeded("G1");
        let wrapped = format!("Sure! Here is your plan:\n{}\nEnjoy!", VALID_PLAN);
        let gateway = Arc::new(ScriptedGateway::new(vec![Reply::Text(wrapped)]));
        let use_case = GeneratePlanUseCase::new(gateway, repo).with_behavior(fast_behavior(1));

        let output = use_case
            .execute(GeneratePlanInput::new(group, Model::default()))
            .await
            .unwrap();

        assert_eq!(output.plan.itinerary().as_array().map(Vec::len), Some(2));
    }
}
