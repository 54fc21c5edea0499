//! CLI entrypoint for gemchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use gemchat_application::{PostMessageUseCase, SendMessageUseCase};
use gemchat_domain::User;
use gemchat_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, GeminiGateway, JsonlConversationLogger, Severity,
};
use gemchat_presentation::{ChatRepl, Cli, OutputConfig, ReplConfig, TypingIndicator};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    config.override_model(cli.model);

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(cli.verbose, &config.logging)?;

    info!("Starting gemchat");
    check_config(&config)?;

    let bot = config.bot.to_bot_config();

    // === Dependency Injection ===
    let settings = config.gemini_settings(|name| std::env::var(name).ok())?;
    let gateway = Arc::new(GeminiGateway::new(settings)?);

    let mut dispatcher = SendMessageUseCase::new(gateway);
    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::open(path)
    {
        info!("Conversation log: {}", logger.path().display());
        dispatcher = dispatcher.with_conversation_logger(Arc::new(logger));
    }

    let show_progress = config.repl.show_progress && !cli.quiet;
    let mut post = PostMessageUseCase::new(dispatcher, bot);
    if show_progress {
        post = post.with_progress(Arc::new(TypingIndicator::new(User::bot().name)));
    }

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
        timestamps: config.output.timestamps,
    };
    let repl = ReplConfig {
        show_progress,
        history_file: config.repl.history_file.clone(),
        username: cli.user.or(config.repl.username.clone()),
    };

    ChatRepl::new(post)
        .with_output_config(output)
        .with_repl_config(repl)
        .run()
        .await?;

    Ok(())
}

/// Console logs by verbosity, plus daily files when `[logging] dir` is set.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file, guard) = match &logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "gemchat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let filter = EnvFilter::try_new(logging.filter.as_deref().unwrap_or("info"))
                .map_err(|e| anyhow!("Invalid logging.filter: {}", e))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}

/// Log warnings; fail on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let mut errors = Vec::new();
    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => warn!("{}", issue),
            Severity::Error => errors.push(issue.to_string()),
        }
    }
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}
