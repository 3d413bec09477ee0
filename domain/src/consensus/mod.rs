//! Group consensus domain
//!
//! Reduces every member's [`Preference`](crate::Preference) into one
//! canonical [`GroupProfile`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  records ──► ConsensusTier::for_group_size                       │
//! │                 │                                               │
//! │        ┌────────┼───────────────┐                               │
//! │      Solo     Pair            Group                             │
//! │   passthrough  mean/median/   same reduction as Pair            │
//! │                mode/union       + FeatureNormalizer             │
//! │                                 + ClusterPartitioner (k = 3)    │
//! │        └────────┴───────┬───────┘                               │
//! │                         ▼                                       │
//! │           Aggregation { profile, clusters }                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cluster labels are an auxiliary output. They are never folded back into
//! the profile.

pub mod aggregator;
pub mod normalizer;
pub mod partitioner;
pub mod profile;
pub mod statistics;
pub mod tier;

pub use aggregator::{Aggregation, ConsensusAggregator, aggregate};
pub use normalizer::FeatureNormalizer;
pub use partitioner::{ClusterAssignment, ClusterPartitioner, ClusteringConfig};
pub use profile::GroupProfile;
pub use tier::ConsensusTier;
