//! Group configuration from TOML (`[group]` section)

use packvote_domain::GroupId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGroupConfig {
    /// Group id used when `--group` is not given
    pub default: String,
}

impl Default for FileGroupConfig {
    fn default() -> Self {
        Self {
            default: GroupId::default().to_string(),
        }
    }
}

impl FileGroupConfig {
    pub fn default_group(&self) -> GroupId {
        GroupId::new(self.default.trim())
    }
}
