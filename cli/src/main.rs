//! CLI entrypoint for expert-debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    DebateProgressNotifier, DescribePersonaUseCase, ManagePersonasUseCase, NoDebateProgress,
    RunDebateUseCase, ShareDebateUseCase,
};
use debate_domain::{DebateConfiguration, PersonaId, PersonaRegistry, ShareRecord};
use debate_infrastructure::{
    ConfigLoader, FileConfig, GeminiLlmGateway, JsonPersonaStore, JsonShareStore,
    JsonlConversationLogger,
};
use debate_presentation::{
    Cli, Command, ConsoleFormatter, DebateArgs, DebateReporter, ExpertsAction, OutputFormat,
};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting expert-debate");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", issue);
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Configuration has errors; fix them and retry");
    }

    let data_dir = config.storage.resolve_data_dir();
    let personas = ManagePersonasUseCase::new(Arc::new(JsonPersonaStore::in_dir(&data_dir)));
    let shares = ShareDebateUseCase::new(Arc::new(JsonShareStore::in_dir(&data_dir)));

    match cli.command {
        Command::Debate(ref args) => {
            let registry = personas.registry().await?;
            run_debate(&cli, args, &config, &registry, &shares, &data_dir).await
        }
        Command::Experts { ref action } => match action {
            ExpertsAction::List => {
                let registry = personas.registry().await?;
                print!("{}", ConsoleFormatter::format_personas(&registry));
                Ok(())
            }
            ExpertsAction::Add {
                name,
                description,
                generate,
            } => {
                let description = match (description, generate) {
                    (Some(text), _) => text.clone(),
                    (None, true) => describe(&config, name).await?,
                    (None, false) => bail!("Give a --description or pass --describe"),
                };
                let persona = personas.add(name, &description).await?;
                println!("Added expert '{}' ({})", persona.name(), persona.id());
                Ok(())
            }
            ExpertsAction::Update {
                id,
                name,
                description,
            } => {
                let persona = personas
                    .update(&PersonaId::new(id.as_str()), name, description)
                    .await?;
                println!("Updated expert '{}' ({})", persona.name(), persona.id());
                Ok(())
            }
            ExpertsAction::Remove { id } => {
                let persona = personas.remove(&PersonaId::new(id.as_str())).await?;
                println!("Removed expert '{}'", persona.name());
                Ok(())
            }
        },
        Command::Describe { ref name } => {
            println!("{}", describe(&config, name).await?);
            Ok(())
        }
        Command::Show {
            ref share_id,
            output,
        } => {
            let Some(record) = shares.load(share_id).await? else {
                bail!("No shared debate with id '{}'", share_id);
            };
            let rendered = match output {
                OutputFormat::Text => ConsoleFormatter::format_record(&record),
                OutputFormat::Json => ConsoleFormatter::format_json(&record),
            };
            println!("{}", rendered);
            Ok(())
        }
        Command::Config => {
            println!("Configuration sources (highest priority first):");
            if cli.no_config {
                println!("  (disabled by --no-config)");
            } else {
                for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
                    println!("{}", line);
                }
            }
            println!();
            println!("Data directory: {}", data_dir.display());
            if issues.is_empty() {
                println!("No configuration issues found.");
            }
            Ok(())
        }
    }
}

/// Route tracing output to stderr, or to a file when `--log-file` is given
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn gateway(config: &FileConfig) -> Result<Arc<GeminiLlmGateway>> {
    let Some(gemini) = config.provider.to_gemini_config() else {
        bail!("No API key found: set GEMINI_API_KEY or [provider] api_key");
    };
    Ok(Arc::new(GeminiLlmGateway::new(gemini)?))
}

async fn describe(config: &FileConfig, name: &str) -> Result<String> {
    let use_case = DescribePersonaUseCase::new(gateway(config)?)
        .with_model(config.models.to_model_settings().describe);
    Ok(use_case.execute(name).await?)
}

async fn run_debate(
    cli: &Cli,
    args: &DebateArgs,
    config: &FileConfig,
    registry: &PersonaRegistry,
    shares: &ShareDebateUseCase<JsonShareStore>,
    data_dir: &Path,
) -> Result<()> {
    let ids = args.experts.iter().map(|id| PersonaId::new(id.as_str())).collect();
    let configuration = DebateConfiguration::new(args.topic.as_str(), ids)?
        .with_turn_budget(args.turns.unwrap_or(config.debate.turn_budget))?;

    let mut params = config.debate_params();
    if args.no_pacing {
        params = params.without_pacing();
    }
    let mut use_case = RunDebateUseCase::new(gateway(config)?)
        .with_models(config.models.to_model_settings())
        .with_params(params);

    let logger = match &args.conversation_log {
        Some(path) => JsonlConversationLogger::new(path),
        None => JsonlConversationLogger::in_dir(data_dir.join("logs")),
    };
    match logger {
        Some(logger) => {
            info!("Recording debate events to {}", logger.path().display());
            use_case = use_case.with_logger(Arc::new(logger));
        }
        None => warn!("Conversation log unavailable, continuing without it"),
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let live = !cli.quiet && args.output == OutputFormat::Text;
    let progress: Box<dyn DebateProgressNotifier> = if live {
        Box::new(DebateReporter::new())
    } else {
        Box::new(NoDebateProgress)
    };

    let outcome = use_case
        .execute(configuration, registry, &cancel, &*progress)
        .await?;

    match args.output {
        OutputFormat::Text => {
            if !live {
                let topic = outcome.session.topic().unwrap_or_default();
                println!(
                    "{}",
                    ConsoleFormatter::format_transcript(
                        topic,
                        outcome.session.transcript().messages()
                    )
                );
            }
            if outcome.stopped_early {
                println!(
                    "Debate stopped after {} of {} turns",
                    outcome.session.turn_index(),
                    outcome.session.turn_budget()
                );
            }
        }
        OutputFormat::Json => {
            let record =
                ShareRecord::from_session(&outcome.session, chrono::Utc::now().timestamp_millis())?;
            println!("{}", ConsoleFormatter::format_json(&record));
        }
    }

    if args.share {
        let id = shares.save(&outcome.session).await?;
        println!("Shared as {} (view with `expert-debate show {}`)", id, id);
    }

    Ok(())
}
