//! Content-side pipeline.
//!
//! Owns the page document, its ledger and the capability sessions. Nothing
//! outside this type mutates them; other contexts only see the counts it
//! sends back.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use quell_config::PageConfig;
use quell_protocols::{CapabilityKind, CapabilityProvider, ContentRequest, QuellResponse};

use crate::document::Document;
use crate::error::QuellError;
use crate::handle::{PipelineCommand, PipelineHandle};
use crate::ledger::OriginalTextLedger;
use crate::rewriter::SessionRewriter;
use crate::scheduler::{BatchReport, BatchScheduler};
use crate::selector::TextBlockSelector;
use crate::session::SessionManager;

const COMMAND_BUFFER: usize = 16;

/// Scan, rewrite and revert for one page.
pub struct ContentPipeline {
    document: Document,
    ledger: OriginalTextLedger,
    sessions: SessionManager,
    selector: TextBlockSelector,
    scheduler: BatchScheduler,
    proofread: bool,
}

impl ContentPipeline {
    /// Pipeline over `document`. Units that already show a rewrite are
    /// entered in the ledger, so they are skipped on activation and restored
    /// on revert.
    pub fn new(document: Document, provider: Arc<dyn CapabilityProvider>, config: &PageConfig) -> Self {
        let ledger = OriginalTextLedger::from_document(&document);
        if !ledger.is_empty() {
            debug!(rewritten = ledger.len(), "Loaded page with existing rewrites");
        }
        Self {
            document,
            ledger,
            sessions: SessionManager::new(provider),
            selector: TextBlockSelector::new(config.min_text_length),
            scheduler: BatchScheduler::new(config.batch_size, Duration::from_millis(config.yield_ms)),
            proofread: config.proofread,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for pointer events.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn ledger(&self) -> &OriginalTextLedger {
        &self.ledger
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    fn required_kinds(&self) -> Vec<CapabilityKind> {
        let mut kinds = vec![CapabilityKind::Rewrite];
        if self.proofread {
            kinds.push(CapabilityKind::Proofread);
        }
        kinds
    }

    /// Prepare sessions, select candidates and rewrite them in batches.
    ///
    /// On a session failure no unit is touched and any session created
    /// along the way is destroyed.
    pub async fn activate(&mut self) -> Result<BatchReport, QuellError> {
        let kinds = self.required_kinds();
        if let Err(e) = self.sessions.ensure_ready(&kinds).await {
            self.sessions.teardown().await;
            return Err(e);
        }
        let rewriter = SessionRewriter::from_manager(&self.sessions, self.proofread)?;

        let candidates = self.selector.select(&self.document, &self.ledger);
        info!(
            candidates = candidates.len(),
            proofread = rewriter.has_proofreader(),
            "Quelling page"
        );

        let report = self
            .scheduler
            .run_batches(&candidates, &mut self.document, &mut self.ledger, &rewriter)
            .await;

        info!(
            changes = report.applied(),
            failed = report.failed(),
            batches = report.batches.len(),
            "Page quelled"
        );
        Ok(report)
    }

    /// Restore every changed unit and destroy all sessions.
    pub async fn revert_all(&mut self) -> usize {
        let restored = self.ledger.revert_all(&mut self.document);
        let destroyed = self.sessions.teardown().await;
        debug!(restored, destroyed, "Page reverted");
        restored
    }

    /// Destroy every session and keep the page as it is.
    pub async fn release_sessions(&mut self) -> usize {
        self.sessions.teardown().await
    }

    /// Activate or revert, always answering with one response.
    pub async fn run_full_quell(&mut self, is_active: bool) -> QuellResponse {
        if !is_active {
            return QuellResponse::success(self.revert_all().await);
        }
        match self.activate().await {
            Ok(report) => QuellResponse::success(report.applied()),
            Err(e) => {
                error!(error = %e, "Page quell failed");
                QuellResponse::failure(e.to_string())
            }
        }
    }

    pub async fn handle(&mut self, request: ContentRequest) -> QuellResponse {
        match request {
            ContentRequest::RunFullQuell { is_active } => self.run_full_quell(is_active).await,
        }
    }

    /// Run the pipeline on its own task.
    ///
    /// The task ends when every handle is dropped and yields the pipeline
    /// back so the final page can be read.
    pub fn spawn(self) -> (PipelineHandle, JoinHandle<ContentPipeline>) {
        let (tx, mut rx) = mpsc::channel::<PipelineCommand>(COMMAND_BUFFER);
        let task = tokio::spawn(async move {
            let mut pipeline = self;
            while let Some(PipelineCommand { request, reply }) = rx.recv().await {
                let response = pipeline.handle(request).await;
                if reply.send(response).is_err() {
                    warn!("Requester went away before the pipeline responded");
                }
            }
            debug!("Content pipeline channel closed");
            pipeline
        });
        (PipelineHandle::new(tx), task)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
