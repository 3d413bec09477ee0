//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const STORE_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Preference store file; defaults to the user data directory
    pub path: Option<PathBuf>,
}

impl FileStorageConfig {
    /// Configured path, else `$XDG_DATA_HOME/packvote/preferences.json`,
    /// else `./preferences.json`
    pub fn resolve_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("packvote").join(STORE_FILE))
                .unwrap_or_else(|| PathBuf::from(STORE_FILE))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_is_used() {
        let config = FileStorageConfig {
            path: Some(PathBuf::from("/tmp/trip.json")),
        };
        assert_eq!(config.resolve_path(), PathBuf::from("/tmp/trip.json"));
    }

    #[test]
    fn test_default_path_ends_with_store_file() {
        assert!(FileStorageConfig::default().resolve_path().ends_with(STORE_FILE));
    }
}
