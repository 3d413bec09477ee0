//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use packvote_domain::TravelStyle;
use std::path::PathBuf;

/// Output format for planning results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Group profile, analytics, clusters and the plan
    Full,
    /// Only the plan
    Plan,
    /// JSON output
    Json,
}

impl From<OutputFormat> for packvote_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => packvote_domain::OutputFormat::Full,
            OutputFormat::Plan => packvote_domain::OutputFormat::Plan,
            OutputFormat::Json => packvote_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for packvote
#[derive(Parser, Debug)]
#[command(name = "packvote")]
#[command(author, version, about = "Group trip planning - turn everyone's preferences into one fair plan")]
#[command(long_about = r#"
PackVote collects each member's trip preferences, reduces them to one group
profile, and asks Gemini for a plan that nobody in the group has to stretch
their budget for.

Flow:
1. Members submit preferences (budget, destination, days, style, shopping)
2. The group profile is aggregated; the lowest budget is a hard ceiling
3. Gemini drafts a plan, which is validated before it is shown

Configuration files are loaded from (in priority order):
1. PACKVOTE_* environment variables
2. --config <path>      Explicit config file
3. ./packvote.toml      Project-level config
4. ~/.config/packvote/config.toml   Global config

Example:
  packvote submit --budget 3000 --destination Goa --duration 4 --style relaxation
  packvote --group goa-trip import members.json
  packvote --group goa-trip profile
  GEMINI_API_KEY=... packvote --group goa-trip plan
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Group to operate on (defaults to [group] default in config)
    #[arg(short, long, global = true, value_name = "GROUP")]
    pub group: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Submit one member's preference
    Submit(SubmitArgs),

    /// Import a JSON array of preferences (all or nothing)
    Import {
        /// JSON file to read
        path: PathBuf,
    },

    /// Show the aggregated group profile without calling the engine
    Profile,

    /// Generate a validated plan for the group
    Plan {
        /// Gemini model to use (overrides [provider] model)
        #[arg(short, long, value_name = "MODEL")]
        model: Option<String>,

        /// Engine calls allowed, including the first (overrides [behavior] max_attempts)
        #[arg(long, value_name = "N")]
        attempts: Option<u32>,

        /// Keep the group's preferences after a plan is accepted
        #[arg(long)]
        keep: bool,
    },

    /// Validate a saved engine response against a budget floor
    Validate {
        /// File holding the raw response ("-" reads stdin)
        path: PathBuf,

        /// Per-person budget ceiling to check against
        #[arg(long, value_name = "AMOUNT", value_parser = parse_budget_floor)]
        min_budget: f64,
    },

    /// Remove every preference of the group
    Clear,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Per-person budget
    #[arg(short, long)]
    pub budget: f64,

    /// Preferred destination (advisory)
    #[arg(short, long, default_value = "")]
    pub destination: String,

    /// Trip length in days
    #[arg(long)]
    pub duration: u32,

    /// relaxation, adventure, cultural or luxury
    #[arg(short, long, default_value = "relaxation", value_parser = parse_travel_style)]
    pub style: TravelStyle,

    /// What the member wants to shop for
    #[arg(long, default_value = "")]
    pub shopping: String,
}

fn parse_travel_style(s: &str) -> Result<TravelStyle, String> {
    s.parse().map_err(|e: packvote_domain::PreferenceError| e.to_string())
}

fn parse_budget_floor(s: &str) -> Result<f64, String> {
    let amount: f64 = s.trim().parse().map_err(|_| format!("'{}' is not a number", s))?;
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(format!("budget floor must be a positive amount, got {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "packvote", "--group", "goa-trip", "submit", "--budget", "3000", "--destination",
            "Goa", "--duration", "4", "--style", "Adventure",
        ])
        .unwrap();

        assert_eq!(cli.group.as_deref(), Some("goa-trip"));
        let Some(Command::Submit(args)) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.budget, 3000.0);
        assert_eq!(args.style, TravelStyle::Adventure);
        assert_eq!(args.shopping, "");
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let result = Cli::try_parse_from([
            "packvote", "submit", "--budget", "1", "--duration", "1", "--style", "camping",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["packvote", "plan", "-vv", "--output", "json", "--keep"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Some(Command::Plan { keep: true, .. })));
    }

    #[test]
    fn test_validate_requires_min_budget() {
        assert!(Cli::try_parse_from(["packvote", "validate", "resp.json"]).is_err());
        let cli =
            Cli::try_parse_from(["packvote", "validate", "-", "--min-budget", "3000"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Validate { min_budget, .. }) if min_budget == 3000.0
        ));
    }

    #[test]
    fn test_validate_rejects_unusable_floor() {
        for floor in ["NaN", "inf", "0", "-3000", "lots"] {
            let result = Cli::try_parse_from(["packvote", "validate", "-", "--min-budget", floor]);
            assert!(result.is_err(), "{floor}");
        }
    }
}
