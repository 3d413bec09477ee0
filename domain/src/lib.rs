//! Domain layer for packvote
//!
//! This crate contains the core business logic: turning every member's trip
//! preference into one group profile, and turning an untrusted engine
//! response into a validated plan. It has no dependencies on infrastructure
//! or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Consensus
//!
//! - **Consensus tier**: the aggregation policy, chosen by group size
//!   (solo / pair / group)
//! - **Group profile**: the canonical summary that drives plan generation,
//!   including the budget floor of the most constrained member
//! - **Clusters**: an informational k-means grouping of members, never
//!   folded into the profile
//!
//! ## Plan validation
//!
//! - **Recovery parse**: best-effort extraction of a JSON object from prose
//! - **Plan**: a document with all nine required fields whose per-person
//!   total respects the budget floor

pub mod config;
pub mod consensus;
pub mod core;
pub mod plan;
pub mod preference;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consensus::{
    Aggregation, ClusterAssignment, ClusterPartitioner, ClusteringConfig, ConsensusAggregator,
    ConsensusTier, FeatureNormalizer, GroupProfile, aggregate,
};
pub use core::{
    error::{DomainError, ErrorKind},
    model::Model,
};
pub use plan::{BudgetBreakdown, Plan, PlanValidator, REQUIRED_FIELDS, RecoveryStep, validate_plan};
pub use preference::{GroupAnalytics, GroupId, Preference, PreferenceError, TravelStyle};
pub use prompt::PromptTemplate;
