//! Behavior configuration from TOML (`[behavior]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Engine calls per plan request, including the first
    pub max_attempts: u32,
    /// Base backoff before retrying an upstream failure, in milliseconds
    pub retry_backoff_ms: u64,
    /// Remove a group's records once its plan is accepted
    pub clear_after_plan: bool,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            retry_backoff_ms: 500,
            clear_after_plan: true,
        }
    }
}
