//! Page and toggle subcommand handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use quell_config::{Config, ConfigLoader, PageConfig};
use quell_core::{ContentPipeline, Document, QuellError, SelectorRules};
use quell_protocols::{CapabilityProvider, QuellResponse, UiRequest};
use quell_runtime::{install, FileToggleStateStore, ToggleCoordinator, ToggleStateStore};

use crate::cli::ToggleState;

/// Quell a page once and return the response with the rendered page.
pub(crate) async fn quell_html(
    html: &str,
    provider: Arc<dyn CapabilityProvider>,
    config: &PageConfig,
) -> Result<(QuellResponse, String), QuellError> {
    let document = Document::parse_html(html, &SelectorRules::new(config.include_containers))?;
    let mut pipeline = ContentPipeline::new(document, provider, config);
    let response = pipeline.run_full_quell(true).await;
    pipeline.release_sessions().await;
    Ok((response, pipeline.document().render_html()))
}

pub(crate) async fn page(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
    file: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(file).await?;
    let (response, rendered) = quell_html(&html, provider, &config.page).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    match output {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            info!(path = %path.display(), "Wrote quelled page");
        }
        None if !json => println!("{rendered}"),
        None => {}
    }
    if !response.success {
        return Err(response.error.unwrap_or_default().into());
    }
    Ok(())
}

fn state_store(config: &Config) -> Arc<FileToggleStateStore> {
    Arc::new(FileToggleStateStore::new(ConfigLoader::expand_path(
        &config.storage.state_path,
    )))
}

fn coordinator(config: &Config, pipeline: ContentPipeline) -> (ToggleCoordinator, tokio::task::JoinHandle<ContentPipeline>) {
    let (handle, task) = pipeline.spawn();
    let coordinator = ToggleCoordinator::new(
        state_store(config),
        Arc::new(handle),
        Duration::from_secs(config.coordinator.response_timeout_secs),
    );
    (coordinator, task)
}

/// Drive a toggle through the coordinator against one page.
pub(crate) async fn toggle(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
    state: ToggleState,
    page: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(page).await?;
    let document = Document::parse_html(&html, &SelectorRules::new(config.page.include_containers))?;
    let pipeline = ContentPipeline::new(document, provider, &config.page);
    let (coordinator, task) = coordinator(config, pipeline);

    let response = coordinator
        .handle(UiRequest::Toggle { new_state: state.is_on() })
        .await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    // Dropping the coordinator closes the channel and ends the pipeline task.
    drop(coordinator);
    let mut pipeline = task.await?;
    pipeline.release_sessions().await;

    if let Some(path) = output {
        tokio::fs::write(path, pipeline.document().render_html()).await?;
        info!(path = %path.display(), "Wrote page");
    }
    Ok(())
}

pub(crate) async fn status(
    config: &Config,
    provider: Arc<dyn CapabilityProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = ContentPipeline::new(Document::new(), provider, &config.page);
    let (coordinator, task) = coordinator(config, pipeline);
    let response = coordinator.handle(UiRequest::GetToggleState).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    drop(coordinator);
    task.await?;
    Ok(())
}

pub(crate) async fn reset(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = state_store(config);
    store.reset().await?;
    println!("Toggle state cleared ({})", store.path().display());
    Ok(())
}

pub(crate) async fn install_default(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = state_store(config);
    install(store.as_ref()).await?;
    println!("Toggle state initialized ({})", store.path().display());
    Ok(())
}
