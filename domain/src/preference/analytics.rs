//! Group analytics
//!
//! Descriptive statistics over a group's raw records, independent of the
//! consensus tier. Returned alongside the profile and quoted in the planning
//! prompt.

use super::entities::Preference;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAnalytics {
    pub total_members: usize,
    pub avg_budget: f64,
    pub min_budget: f64,
    pub max_budget: f64,
    pub min_duration: u32,
    pub max_duration: u32,
}

impl GroupAnalytics {
    /// Compute analytics for a group; `None` when nobody has submitted yet
    pub fn from_records(records: &[Preference]) -> Option<Self> {
        let first = records.first()?;

        let mut analytics = Self {
            total_members: records.len(),
            avg_budget: 0.0,
            min_budget: first.budget,
            max_budget: first.budget,
            min_duration: first.duration,
            max_duration: first.duration,
        };

        let mut total = 0.0;
        for record in records {
            total += record.budget;
            analytics.min_budget = analytics.min_budget.min(record.budget);
            analytics.max_budget = analytics.max_budget.max(record.budget);
            analytics.min_duration = analytics.min_duration.min(record.duration);
            analytics.max_duration = analytics.max_duration.max(record.duration);
        }
        analytics.avg_budget = total / records.len() as f64;

        Some(analytics)
    }

    /// Spread between the richest and the most constrained member
    pub fn budget_spread(&self) -> f64 {
        self.max_budget - self.min_budget
    }
}
