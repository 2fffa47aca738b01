//! CLI entrypoint for socratic-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use socratic_application::{BehaviorConfig, TurnController, TurnNotifier, TurnOutcome};
use socratic_domain::Model;
use socratic_infrastructure::{
    ConfigLoader, FileConfig, HttpQueryClient, LoggingQueryClient, resolve_api_key,
};
use socratic_presentation::{
    ChatRepl, Cli, OutputConfig, ProgressReporter, ReplConfig, SimpleProgress,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let output_config = OutputConfig {
        color: config.output.color && !cli.no_color,
    };
    output_config.apply();

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
    };

    info!("Starting socratic-chat");

    // === Dependency Injection ===
    let api_key = resolve_api_key(&config.endpoint)?;
    let behavior = BehaviorConfig::from_raw(
        config.behavior.timeout_seconds,
        config.behavior.stream_pacing_ms,
    );
    let http = HttpQueryClient::new(config.endpoint.url.clone(), api_key, behavior.timeout)?;
    info!(endpoint = %http.endpoint(), "Query endpoint configured");
    let client = Arc::new(LoggingQueryClient::new(Arc::new(http)));

    let controller = Arc::new(
        TurnController::new(client)
            .with_model(config.model.to_model())
            .with_params(config.model_params.clone())
            .with_streamer(behavior.streamer()),
    );

    info!(model = %controller.model(), "Session ready");

    // Chat mode
    if cli.chat {
        ChatRepl::new(controller).with_config(&repl_config).run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let notifier: Box<dyn TurnNotifier> = if repl_config.show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress::new())
    };

    match controller.on_user_input(&question, notifier.as_ref()).await? {
        TurnOutcome::Answered { .. } => Ok(ExitCode::SUCCESS),
        TurnOutcome::Failed(_) => Ok(ExitCode::FAILURE),
        TurnOutcome::Ignored => bail!("Question is empty."),
        TurnOutcome::Dropped => bail!("A previous question is still awaiting a response."),
    }
}

/// Install the tracing subscriber: stderr always, plus a daily rolling file
/// when `log_dir` is given.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "socratic-chat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// CLI flags win over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        let model: Model = model.parse().unwrap_or_else(|never| match never {});
        config.model.provider = model.provider().to_string();
        config.model.name = model.name().to_string();
    }
    if let Some(temperature) = cli.temperature {
        config.model_params.temperature = temperature;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.model_params.max_tokens = max_tokens;
    }
    if let Some(system_prompt) = &cli.system_prompt {
        config.model_params.system_prompt = system_prompt.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.url = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.behavior.timeout_seconds = Some(timeout);
    }
    if let Some(pacing) = cli.pacing {
        config.behavior.stream_pacing_ms = pacing;
    }
}
