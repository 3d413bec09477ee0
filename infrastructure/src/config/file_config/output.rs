//! `[output]` section: how plans and errors reach the terminal

use packvote_domain::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Default rendering of `generate` results; `--output` wins over it
    pub format: Option<OutputFormat>,
    /// Colored terminal output
    pub color: bool,
    /// Phase spinners while the planning engine works.
    ///
    /// Off is useful in CI logs; JSON output and `--quiet` hide them anyway.
    pub progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            progress: true,
        }
    }
}
