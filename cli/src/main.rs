//! CLI entrypoint for PackVote
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use packvote_application::{
    ClearGroupUseCase, GeneratePlanInput, GeneratePlanUseCase, GroupLocks,
    NoTranscript, PreferenceRepository, ProgressNotifier, SubmitPreferenceUseCase, TranscriptLogger,
};
use packvote_domain::{
    ConsensusAggregator, GroupId, Model, OutputFormat, PlanValidator, Preference, Severity,
};
use packvote_infrastructure::{
    ConfigLoader, FileConfig, GeminiLlmGateway, GeminiProviderConfig, JsonPreferenceRepository,
    JsonlPlanningLogger,
};
use packvote_presentation::{
    Cli, Command, ConsoleFormatter, OutputConfig, ProgressReporter, SimpleProgress, SubmitArgs,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Everything the subcommands share
struct App {
    file: FileConfig,
    output: OutputConfig,
    group: GroupId,
    repository: Arc<JsonPreferenceRepository>,
    locks: Arc<GroupLocks>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting PackVote");

    let file = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = file.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Configuration is invalid");
    }

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        file.output.format,
        file.output.color,
        file.output.progress,
        cli.quiet,
    );
    output.apply_color();

    let group = cli
        .group
        .as_deref()
        .map(GroupId::from)
        .unwrap_or_else(|| file.group.default_group());

    // === Dependency Injection ===
    let store_path = file.storage.resolve_path();
    info!(path = %store_path.display(), "Using preference store");
    let app = App {
        repository: Arc::new(JsonPreferenceRepository::new(store_path)),
        locks: Arc::new(GroupLocks::new()),
        file,
        output,
        group,
    };

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Command::Submit(args) => submit(&app, args).await,
        Command::Import { path } => import(&app, &path).await,
        Command::Profile => profile(&app).await,
        Command::Plan {
            model,
            attempts,
            keep,
        } => plan(&app, model, attempts, keep).await,
        Command::Validate { path, min_budget } => validate(&app, &path, min_budget).await,
        Command::Clear => clear(&app).await,
    }
}

/// Initialize logging based on verbosity level, plus an optional log file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let Some(name) = path.file_name() else {
                bail!("--log-file must name a file: {}", path.display());
            };
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn submit(app: &App, args: SubmitArgs) -> Result<ExitCode> {
    let preference = Preference::new(
        args.budget,
        args.destination,
        args.duration,
        args.style,
        args.shopping,
    )?;

    let use_case =
        SubmitPreferenceUseCase::new(Arc::clone(&app.repository)).with_locks(Arc::clone(&app.locks));
    let members = use_case.execute(&app.group, preference).await?;

    println!(
        "Stored preference for group {} ({} member{})",
        app.group,
        members,
        if members == 1 { "" } else { "s" }
    );
    Ok(ExitCode::SUCCESS)
}

async fn import(app: &App, path: &Path) -> Result<ExitCode> {
    let json = read_input(path).await?;

    let use_case =
        SubmitPreferenceUseCase::new(Arc::clone(&app.repository)).with_locks(Arc::clone(&app.locks));
    let members = use_case.import_json(&app.group, &json).await?;

    println!("Imported preferences into group {} ({} members)", app.group, members);
    Ok(ExitCode::SUCCESS)
}

async fn profile(app: &App) -> Result<ExitCode> {
    let records = app.repository.fetch_group(&app.group).await?;
    let aggregator = ConsensusAggregator::new(app.file.clustering.clone());

    match aggregator.aggregate(&records) {
        Ok(aggregation) => {
            let text = match app.output.format {
                OutputFormat::Json => ConsoleFormatter::format_profile_json(&aggregation),
                OutputFormat::Full | OutputFormat::Plan => {
                    ConsoleFormatter::format_profile(&aggregation, &records)
                }
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_failure(app, Some(e.kind().to_string()), &e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn plan(
    app: &App,
    model: Option<String>,
    attempts: Option<u32>,
    keep: bool,
) -> Result<ExitCode> {
    let provider = &app.file.provider;
    let Some(api_key) = provider.resolve_api_key() else {
        bail!(
            "No API key found. Set {} or provider.api_key in the config file.",
            provider.api_key_env
        );
    };

    let gemini = GeminiProviderConfig::new(api_key)
        .with_base_url(provider.base_url.clone())
        .with_temperature(provider.temperature)
        .with_request_timeout(Duration::from_secs(provider.timeout_seconds));
    let gateway = Arc::new(GeminiLlmGateway::new(gemini)?);

    let model = match model {
        Some(name) => {
            let Ok(model) = name.parse::<Model>();
            model
        }
        None => provider.parse_model(),
    };

    let mut behavior = app.file.behavior_config();
    if let Some(attempts) = attempts {
        behavior = behavior.with_max_attempts(attempts);
    }
    if keep {
        behavior = behavior.with_clear_after_plan(false);
    }

    let logger: Arc<dyn TranscriptLogger> = match app
        .file
        .logging
        .transcript
        .as_ref()
        .and_then(JsonlPlanningLogger::open)
    {
        Some(logger) => {
            info!(path = %logger.path().display(), "Writing planning transcript");
            Arc::new(logger)
        }
        None => Arc::new(NoTranscript),
    };

    // Snapshot for display; the group may be cleared once the plan is accepted
    let members = app.repository.fetch_group(&app.group).await?;

    let use_case = GeneratePlanUseCase::new(gateway, Arc::clone(&app.repository))
        .with_aggregator(ConsensusAggregator::new(app.file.clustering.clone()))
        .with_behavior(behavior)
        .with_logger(logger)
        .with_locks(Arc::clone(&app.locks));

    let input = GeneratePlanInput::new(app.group.clone(), model);
    let result = if app.output.show_progress {
        let progress: Box<dyn ProgressNotifier> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case.execute_with_progress(input, progress.as_ref()).await
    } else {
        use_case.execute(input).await
    };

    match result {
        Ok(output) => {
            let text = match app.output.format {
                OutputFormat::Full => ConsoleFormatter::format_full(&output, &members),
                OutputFormat::Plan => ConsoleFormatter::format_plan(&output.plan),
                OutputFormat::Json => ConsoleFormatter::format_json(&output),
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            match app.output.format {
                OutputFormat::Json => report_failure(
                    app,
                    e.kind().map(|kind| kind.to_string()),
                    &e.to_string(),
                ),
                _ => eprintln!("{}", ConsoleFormatter::format_error(&e)),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn validate(app: &App, path: &Path, min_budget: f64) -> Result<ExitCode> {
    let raw = read_input(path).await?;

    match PlanValidator::new(min_budget).validate(&raw) {
        Ok(plan) => {
            let text = match app.output.format {
                OutputFormat::Json => ConsoleFormatter::format_plan_json(&plan),
                OutputFormat::Full | OutputFormat::Plan => ConsoleFormatter::format_plan(&plan),
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            match app.output.format {
                OutputFormat::Json => {
                    report_failure(app, Some(e.kind().to_string()), &e.to_string())
                }
                _ => eprintln!("{}", ConsoleFormatter::format_domain_error(&e)),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn clear(app: &App) -> Result<ExitCode> {
    let use_case =
        ClearGroupUseCase::new(Arc::clone(&app.repository)).with_locks(Arc::clone(&app.locks));
    let removed = use_case.execute(&app.group).await?;

    println!("Removed {} preference(s) from group {}", removed, app.group);
    Ok(ExitCode::SUCCESS)
}

fn report_failure(app: &App, kind: Option<String>, message: &str) {
    match app.output.format {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_error_json(kind, message)),
        _ => match kind {
            Some(kind) => eprintln!("Error [{}] {}", kind, message),
            None => eprintln!("Error {}", message),
        },
    }
}

/// Read a file, or stdin when the path is "-"
async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
