//! Output format value object

use serde::{Deserialize, Serialize};

/// How planning results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Group profile, analytics and the plan
    Full,
    /// Only the plan (default)
    #[default]
    Plan,
    /// JSON output
    Json,
}
