//! Consensus tiers
//!
//! The aggregation policy is chosen once per call from the group size.

use serde::{Deserialize, Serialize};

/// Aggregation policy selected by group cardinality
///
/// # Example
///
/// ```
/// use packvote_domain::consensus::ConsensusTier;
///
/// assert_eq!(ConsensusTier::for_group_size(0), None);
/// assert_eq!(ConsensusTier::for_group_size(1), Some(ConsensusTier::Solo));
/// assert_eq!(ConsensusTier::for_group_size(2), Some(ConsensusTier::Pair));
/// assert_eq!(ConsensusTier::for_group_size(7), Some(ConsensusTier::Group));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusTier {
    /// One member: their preference is the plan brief
    Solo,
    /// Two members: statistical reduction only
    Pair,
    /// Three or more: statistical reduction plus clustering side channel
    Group,
}

impl ConsensusTier {
    pub fn for_group_size(members: usize) -> Option<Self> {
        match members {
            0 => None,
            1 => Some(ConsensusTier::Solo),
            2 => Some(ConsensusTier::Pair),
            _ => Some(ConsensusTier::Group),
        }
    }

    /// Whether members are clustered in this tier
    pub fn clusters_members(&self) -> bool {
        matches!(self, ConsensusTier::Group)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusTier::Solo => "solo",
            ConsensusTier::Pair => "pair",
            ConsensusTier::Group => "group",
        }
    }
}

impl std::fmt::Display for ConsensusTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
