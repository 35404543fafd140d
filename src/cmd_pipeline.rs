//! Selection, article and prompt subcommand handlers.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

use quell_config::Config;
use quell_core::HtmlArticleExtractor;
use quell_protocols::capability::PromptOptions;
use quell_protocols::CapabilityProvider;
use quell_runtime::{PipelineOrchestrator, PromptConsole, QuellReport, StageStatus};

/// Orchestrator whose stage updates are printed to stderr as they happen.
fn orchestrator(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
) -> (PipelineOrchestrator, tokio::task::JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<StageStatus>();
    let printer = tokio::spawn(async move {
        while let Some(status) = rx.recv().await {
            eprintln!("{status}");
        }
    });
    let orchestrator =
        PipelineOrchestrator::new(provider, config.orchestrator.clone()).with_status(tx);
    (orchestrator, printer)
}

fn print_report(report: &QuellReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

async fn read_selection(
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return Ok(tokio::fs::read_to_string(path).await?);
    }
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input)
}

pub(crate) async fn selection(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
    text: Option<String>,
    file: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_selection(text, file).await?;
    let (orchestrator, printer) = orchestrator(config, provider);
    let result = orchestrator.run_selection(text.trim()).await;
    drop(orchestrator);
    printer.await?;
    print_report(&result?, json)
}

pub(crate) async fn article(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
    file: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(file).await?;
    let (orchestrator, printer) = orchestrator(config, provider);
    let result = orchestrator.run_article(&html, &HtmlArticleExtractor::new()).await;
    drop(orchestrator);
    printer.await?;
    print_report(&result?, json)
}

pub(crate) async fn prompt(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
    text: &str,
    stream: bool,
    system: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let console = PromptConsole::new(provider).with_options(PromptOptions {
        system_prompt: system,
        temperature: config.provider.temperature,
    });
    console
        .run_with(text, stream, |chunk| {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(chunk.as_bytes());
            let _ = stdout.flush();
        })
        .await?;
    println!();
    Ok(())
}
