//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod behavior;
mod group;
mod logging;
mod output;
mod provider;
mod storage;

pub use behavior::FileBehaviorConfig;
pub use group::FileGroupConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;
pub use storage::FileStorageConfig;

use packvote_application::BehaviorConfig;
use packvote_domain::{ClusteringConfig, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default group selection
    pub group: FileGroupConfig,
    /// Planning engine settings
    pub provider: FileProviderConfig,
    /// Retry and cleanup policy of plan generation
    pub behavior: FileBehaviorConfig,
    /// Member clustering (uses domain type)
    pub clustering: ClusteringConfig,
    /// Preference store location
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// A missing API key is only a warning: commands that never call the
    /// engine work without one.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.group.default.trim().is_empty() {
            issues.push(empty("group.default"));
        }
        if self.provider.model.trim().is_empty() {
            issues.push(empty("provider.model"));
        }
        if self.provider.base_url.trim().is_empty() {
            issues.push(empty("provider.base_url"));
        }
        if self.provider.timeout_seconds == 0 {
            issues.push(out_of_range(
                "provider.timeout_seconds",
                "must be at least 1 second",
            ));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            issues.push(out_of_range(
                "provider.temperature",
                "must be between 0.0 and 2.0",
            ));
        }
        if self.behavior.max_attempts == 0 {
            issues.push(out_of_range("behavior.max_attempts", "must be at least 1"));
        }
        if self.clustering.clusters == 0 {
            issues.push(out_of_range("clustering.clusters", "must be at least 1"));
        }
        if self.clustering.restarts == 0 {
            issues.push(out_of_range("clustering.restarts", "must be at least 1"));
        }
        if self.clustering.max_iterations == 0 {
            issues.push(out_of_range(
                "clustering.max_iterations",
                "must be at least 1",
            ));
        }
        if !(self.clustering.tolerance.is_finite() && self.clustering.tolerance >= 0.0) {
            issues.push(out_of_range(
                "clustering.tolerance",
                "must be a non-negative number",
            ));
        }
        if self.provider.resolve_api_key().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingApiKey {
                    env_var: self.provider.api_key_env.clone(),
                },
                format!(
                    "no API key found: set {} or provider.api_key before running `plan`",
                    self.provider.api_key_env
                ),
            ));
        }

        issues
    }

    /// Use case behavior derived from `[behavior]` and the provider timeout
    pub fn behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::with_timeout_seconds(self.provider.timeout_seconds)
            .with_max_attempts(self.behavior.max_attempts)
            .with_retry_backoff(Duration::from_millis(self.behavior.retry_backoff_ms))
            .with_clear_after_plan(self.behavior.clear_after_plan)
    }
}

fn empty(field: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::EmptyValue {
            field: field.to_string(),
        },
        format!("{} must not be empty", field),
    )
}

fn out_of_range(field: &str, expectation: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        format!("{} {}", field, expectation),
    )
}
