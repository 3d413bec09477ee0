//! Presentation-level configuration
//!
//! Output settings resolved from command-line flags and the config file.

use packvote_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show spinners while the engine works
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Command-line flags win over the file; JSON output never shows spinners
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        file_color: bool,
        file_progress: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color: file_color,
            show_progress: file_progress && !quiet && format != OutputFormat::Json,
        }
    }

    /// Switch terminal colors on or off for the whole process
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_format_overrides_file() {
        let config = OutputConfig::resolve(
            Some(OutputFormat::Full),
            Some(OutputFormat::Json),
            true,
            true,
            false,
        );
        assert_eq!(config.format, OutputFormat::Full);
        assert!(config.show_progress);
    }

    #[test]
    fn test_defaults_to_plan() {
        let config = OutputConfig::resolve(None, None, false, true, false);
        assert_eq!(config.format, OutputFormat::Plan);
        assert!(!config.color);
    }

    #[test]
    fn test_json_and_quiet_hide_progress() {
        assert!(!OutputConfig::resolve(None, Some(OutputFormat::Json), true, true, false).show_progress);
        assert!(!OutputConfig::resolve(None, None, true, true, true).show_progress);
    }

    #[test]
    fn test_file_can_disable_progress() {
        let config = OutputConfig::resolve(Some(OutputFormat::Full), None, true, false, false);
        assert_eq!(config.format, OutputFormat::Full);
        assert!(!config.show_progress);
    }
}
