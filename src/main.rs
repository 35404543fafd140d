//! quell - neutralize biased article text
//!
//! Main entry point for the quell CLI.

mod adapters;
mod cli;
mod cmd_page;
mod cmd_pipeline;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quell_config::{ConfigLoader, LoggingConfig};

use crate::adapters::{build_provider, validate_config};
use crate::cli::{Cli, Commands};

/// Console logging on stderr plus an optional daily rolling log file.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if logging.file {
        let log_dir = ConfigLoader::expand_path(&logging.directory);
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("quell")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes the writer on drop and must live as long as the process.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;
    validate_config(&config)?;

    match cli.command {
        Commands::Reset => return cmd_page::reset(&config).await,
        Commands::Install => return cmd_page::install_default(&config).await,
        _ => {}
    }

    let provider = build_provider(&config.provider, cli.offline, cli.lexicon.as_deref())?;

    match cli.command {
        Commands::Page { file, output, json } => {
            cmd_page::page(&config, provider, &file, output.as_deref(), json).await
        }
        Commands::Toggle { state, page, output } => {
            cmd_page::toggle(&config, provider, state, &page, output.as_deref()).await
        }
        Commands::Status => cmd_page::status(&config, provider).await,
        Commands::Selection { text, file, json } => {
            cmd_pipeline::selection(&config, provider, text, file, json).await
        }
        Commands::Article { file, json } => {
            cmd_pipeline::article(&config, provider, &file, json).await
        }
        Commands::Prompt { text, stream, system } => {
            cmd_pipeline::prompt(&config, provider, &text, stream, system).await
        }
        Commands::Reset | Commands::Install => Ok(()),
    }
}
