//! Configuration file loading for packvote
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PACKVOTE_*` environment variables (`PACKVOTE_PROVIDER__MODEL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./packvote.toml` or `./.packvote.toml`
//! 4. Global: `$XDG_CONFIG_HOME/packvote/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBehaviorConfig, FileConfig, FileGroupConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
