//! Consensus aggregation
//!
//! Applies the tiered policy of [`ConsensusTier`] to a group's records and
//! returns the canonical [`GroupProfile`], plus the clustering side channel
//! for groups of three or more.

use super::normalizer::FeatureNormalizer;
use super::partitioner::{ClusterAssignment, ClusterPartitioner, ClusteringConfig};
use super::profile::GroupProfile;
use super::statistics::{distinct_in_order, mean, median_truncated, mode_first_seen, round_currency};
use super::tier::ConsensusTier;
use crate::core::error::DomainError;
use crate::preference::{GroupAnalytics, Preference};
use serde::{Deserialize, Serialize};

/// Everything one aggregation pass produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub tier: ConsensusTier,
    pub profile: GroupProfile,
    pub analytics: GroupAnalytics,
    /// Cluster labels per member; only computed for [`ConsensusTier::Group`]
    pub clusters: Option<ClusterAssignment>,
}

impl Aggregation {
    /// Cluster label of the member at `index`, when the group was clustered
    pub fn cluster_of(&self, index: usize) -> Option<usize> {
        self.clusters.as_ref().and_then(|c| c.label_for(index))
    }

    pub fn into_profile(self) -> GroupProfile {
        self.profile
    }
}

/// Reduces member preferences into one group profile
///
/// # Example
///
/// ```
/// use packvote_domain::{ConsensusAggregator, ConsensusTier, Preference, TravelStyle};
///
/// let records = vec![
///     Preference::new(3000.0, "Goa", 4, TravelStyle::Relaxation, "spices").unwrap(),
///     Preference::new(5000.0, "Goa", 6, TravelStyle::Adventure, "clothes").unwrap(),
/// ];
///
/// let aggregation = ConsensusAggregator::default().aggregate(&records).unwrap();
/// assert_eq!(aggregation.tier, ConsensusTier::Pair);
/// assert_eq!(aggregation.profile.budget, 4000.0);
/// assert_eq!(aggregation.profile.duration, 5);
/// assert_eq!(aggregation.profile.destination, "Goa");
/// assert_eq!(aggregation.profile.min_budget, 3000.0);
/// assert!(aggregation.clusters.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsensusAggregator {
    partitioner: ClusterPartitioner,
}

impl ConsensusAggregator {
    pub fn new(clustering: ClusteringConfig) -> Self {
        Self {
            partitioner: ClusterPartitioner::new(clustering),
        }
    }

    /// Aggregate an ordered set of records.
    ///
    /// Fails with [`DomainError::InsufficientMembers`] when `records` is empty.
    pub fn aggregate(&self, records: &[Preference]) -> Result<Aggregation, DomainError> {
        let tier = ConsensusTier::for_group_size(records.len())
            .ok_or(DomainError::InsufficientMembers)?;
        let analytics =
            GroupAnalytics::from_records(records).ok_or(DomainError::InsufficientMembers)?;

        let (profile, clusters) = match tier {
            ConsensusTier::Solo => (passthrough(&records[0], &analytics), None),
            ConsensusTier::Pair => (reduce(records, &analytics), None),
            ConsensusTier::Group => (
                reduce(records, &analytics),
                Some(self.partition(records)),
            ),
        };

        Ok(Aggregation {
            tier,
            profile,
            analytics,
            clusters,
        })
    }

    /// Normalize (budget, duration) and partition members
    fn partition(&self, records: &[Preference]) -> ClusterAssignment {
        let features: Vec<[f64; 2]> = records
            .iter()
            .map(|r| [r.budget, f64::from(r.duration)])
            .collect();
        let normalized = FeatureNormalizer::fit_transform(&features);
        self.partitioner.partition(&normalized)
    }
}

/// Aggregate with the default clustering configuration and return the profile only
pub fn aggregate(records: &[Preference]) -> Result<GroupProfile, DomainError> {
    ConsensusAggregator::default()
        .aggregate(records)
        .map(Aggregation::into_profile)
}

fn passthrough(record: &Preference, analytics: &GroupAnalytics) -> GroupProfile {
    GroupProfile {
        budget: record.budget,
        duration: record.duration,
        destination: record.destination.clone(),
        shopping: vec![record.shopping_interest.clone()],
        min_budget: analytics.min_budget,
        max_budget: analytics.max_budget,
        min_duration: analytics.min_duration,
        max_duration: analytics.max_duration,
    }
}

fn reduce(records: &[Preference], analytics: &GroupAnalytics) -> GroupProfile {
    let budgets: Vec<f64> = records.iter().map(|r| r.budget).collect();
    let durations: Vec<u32> = records.iter().map(|r| r.duration).collect();

    // rounding must not push the mean outside the observed range
    let budget =
        round_currency(mean(&budgets)).clamp(analytics.min_budget, analytics.max_budget);

    GroupProfile {
        budget,
        duration: median_truncated(&durations),
        destination: mode_first_seen(records.iter().map(|r| r.destination.as_str())),
        shopping: distinct_in_order(records.iter().map(|r| r.shopping_interest.as_str())),
        min_budget: analytics.min_budget,
        max_budget: analytics.max_budget,
        min_duration: analytics.min_duration,
        max_duration: analytics.max_duration,
    }
}
