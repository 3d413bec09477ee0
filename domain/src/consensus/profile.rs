//! Group profile value object

use serde::{Deserialize, Serialize};

/// The canonical preference summary for one group.
///
/// `budget`, `duration`, `destination` and `shopping` are the representative
/// values chosen by the consensus tier. The `min_*` / `max_*` bounds are the
/// extrema over every record and drive constraint enforcement downstream;
/// `min_budget` is the budget floor a plan must respect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProfile {
    pub budget: f64,
    pub duration: u32,
    pub destination: String,
    pub shopping: Vec<String>,
    pub min_budget: f64,
    pub max_budget: f64,
    pub min_duration: u32,
    pub max_duration: u32,
}

impl GroupProfile {
    /// The per-person budget no plan may exceed
    pub fn budget_floor(&self) -> f64 {
        self.min_budget
    }

    /// Whether the group has agreed on a destination
    pub fn has_destination(&self) -> bool {
        !self.destination.is_empty()
    }
}
