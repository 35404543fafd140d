//! Selection and full-article pipelines.
//!
//! A single text blob runs through a fixed sequence of capability calls:
//! bias scoring, neutral rewrite, key-point summary. Each stage reports a
//! status line before and after it runs. Only the rewrite is mandatory; a
//! failure there aborts the run and discards everything computed so far.

mod assessment;
mod report;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use quell_config::OrchestratorConfig;
use quell_core::{ArticleExtractor, SessionManager, NEUTRALIZE_INSTRUCTION};
use quell_protocols::capability::{
    RewriteOptions, SummarizeOptions, SummaryLength, SummaryType, TextFormat,
};
use quell_protocols::{
    CapabilityError, CapabilityKind, CapabilityProvider, SessionConfig, SessionOutput,
    SessionRequest,
};

use crate::error::OrchestratorError;

pub use assessment::{BiasAssessment, EMOTION_SCORE_RANGE};
pub use report::{BiasOutcome, QuellReport};

/// Which trigger started the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Text the user selected on the page.
    Selection,
    /// Article body extracted from the whole page.
    Article,
}

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    BiasScore,
    Rewrite,
    Summarize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BiasScore => "Bias scoring",
            Self::Rewrite => "Rewrite",
            Self::Summarize => "Summary",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StagePhase {
    Started,
    Finished,
    Skipped,
    Failed,
}

/// Progress line for a UI surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageStatus {
    pub stage: Stage,
    pub phase: StagePhase,
    pub message: String,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Runs the selection and article pipelines against one provider.
pub struct PipelineOrchestrator {
    provider: Arc<dyn CapabilityProvider>,
    config: OrchestratorConfig,
    status: Option<mpsc::UnboundedSender<StageStatus>>,
}

impl PipelineOrchestrator {
    pub fn new(provider: Arc<dyn CapabilityProvider>, config: OrchestratorConfig) -> Self {
        Self {
            provider,
            config,
            status: None,
        }
    }

    /// Send stage progress to `status`.
    pub fn with_status(mut self, status: mpsc::UnboundedSender<StageStatus>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn min_length(&self, mode: PipelineMode) -> usize {
        match mode {
            PipelineMode::Selection => self.config.min_selection_length,
            PipelineMode::Article => self.config.min_article_length,
        }
    }

    /// Process text the user selected.
    pub async fn run_selection(&self, text: &str) -> Result<QuellReport, OrchestratorError> {
        self.run(PipelineMode::Selection, text, None).await
    }

    /// Extract the article from a page and process it.
    pub async fn run_article(
        &self,
        html: &str,
        extractor: &dyn ArticleExtractor,
    ) -> Result<QuellReport, OrchestratorError> {
        let article = extractor.extract(html)?;
        debug!(chars = article.char_count(), "Extracted article");
        self.run(PipelineMode::Article, &article.text, article.title)
            .await
    }

    /// Run every stage over `text`.
    ///
    /// Input shorter than the mode's minimum is rejected before any
    /// capability is touched. A run without a usable rewriter fails before
    /// any session is created. Sessions are destroyed when the run ends,
    /// whatever the outcome.
    pub async fn run(
        &self,
        mode: PipelineMode,
        text: &str,
        title: Option<String>,
    ) -> Result<QuellReport, OrchestratorError> {
        let text = text.trim();
        let actual = text.chars().count();
        let min = self.min_length(mode);
        if actual < min {
            warn!(?mode, actual, min, "Input too short");
            return Err(OrchestratorError::InputTooShort { min, actual });
        }

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("quell_run", %run_id, ?mode);
        async move {
            self.check_rewriter().await?;
            let mut sessions = self.session_manager();
            let result = self.run_stages(&mut sessions, text).await;
            sessions.teardown().await;

            let (bias, neutral_text, key_points) = match result {
                Ok(parts) => parts,
                Err(e) => {
                    warn!(error = %e, "Pipeline aborted");
                    return Err(e);
                }
            };
            info!(key_points = key_points.len(), "Pipeline complete");
            Ok(QuellReport {
                mode,
                title,
                input_chars: actual,
                bias,
                neutral_text,
                key_points,
            })
        }
        .instrument(span)
        .await
    }

    async fn check_rewriter(&self) -> Result<(), OrchestratorError> {
        if self.provider.availability(CapabilityKind::Rewrite).await.is_usable() {
            return Ok(());
        }
        let source = CapabilityError::Unavailable(CapabilityKind::Rewrite);
        warn!("Rewriter unavailable, nothing to run");
        self.report(Stage::Rewrite, StagePhase::Failed, format!("Rewrite failed: {source}"));
        Err(OrchestratorError::Stage {
            stage: Stage::Rewrite,
            source,
        })
    }

    fn session_manager(&self) -> SessionManager {
        SessionManager::new(Arc::clone(&self.provider))
            .with_config(SessionConfig::Rewrite(RewriteOptions {
                shared_context: Some(NEUTRALIZE_INSTRUCTION.to_string()),
                ..Default::default()
            }))
            .with_config(SessionConfig::Summarize(SummarizeOptions {
                summary_type: SummaryType::KeyPoints,
                format: TextFormat::PlainText,
                length: SummaryLength::Short,
                shared_context: None,
            }))
    }

    async fn run_stages(
        &self,
        sessions: &mut SessionManager,
        text: &str,
    ) -> Result<(BiasOutcome, String, Vec<String>), OrchestratorError> {
        let bias = self.score(sessions, text).await;
        let neutral = self.rewrite(sessions, text).await?;
        let key_points = self.summarize(sessions, &neutral).await?;
        Ok((bias, neutral, key_points))
    }

    async fn score(&self, sessions: &mut SessionManager, text: &str) -> BiasOutcome {
        if !self.config.bias_scoring {
            self.report(Stage::BiasScore, StagePhase::Skipped, "Bias scoring disabled");
            return BiasOutcome::Disabled;
        }

        self.report(Stage::BiasScore, StagePhase::Started, "Scoring emotional tone...");
        let max = self.config.max_hype_words;
        let scored = async {
            let session = sessions.acquire(CapabilityKind::Prompt).await?;
            let request = SessionRequest::messages(BiasAssessment::prompt(text, max))
                .with_response_constraint(BiasAssessment::response_schema(max));
            BiasAssessment::parse(session.invoke(request).await?, max)
        }
        .await;

        match scored {
            Ok(assessment) => {
                self.report(
                    Stage::BiasScore,
                    StagePhase::Finished,
                    format!("Emotion score: {}", assessment.emotion_score),
                );
                BiasOutcome::Scored(assessment)
            }
            Err(e) => {
                warn!(error = %e, "Bias scoring failed, continuing without a score");
                self.report(
                    Stage::BiasScore,
                    StagePhase::Failed,
                    "Bias score unavailable, continuing",
                );
                BiasOutcome::Unavailable
            }
        }
    }

    async fn rewrite(
        &self,
        sessions: &mut SessionManager,
        text: &str,
    ) -> Result<String, OrchestratorError> {
        self.report(Stage::Rewrite, StagePhase::Started, "Rewriting in a neutral tone...");
        let rewritten = async {
            let session = sessions.acquire(CapabilityKind::Rewrite).await?;
            let request = SessionRequest::text(text).with_context(NEUTRALIZE_INSTRUCTION);
            match session.invoke(request).await? {
                SessionOutput::Text(out) if !out.trim().is_empty() => Ok(out.trim().to_string()),
                SessionOutput::Text(_) => Err(CapabilityError::UnexpectedOutput(
                    "empty rewrite".to_string(),
                )),
                SessionOutput::Structured(value) => {
                    Err(CapabilityError::UnexpectedOutput(value.to_string()))
                }
            }
        }
        .await;

        match rewritten {
            Ok(neutral) => {
                self.report(Stage::Rewrite, StagePhase::Finished, "Neutral rewrite ready");
                Ok(neutral)
            }
            Err(source) => {
                self.report(Stage::Rewrite, StagePhase::Failed, format!("Rewrite failed: {source}"));
                Err(OrchestratorError::Stage {
                    stage: Stage::Rewrite,
                    source,
                })
            }
        }
    }

    async fn summarize(
        &self,
        sessions: &mut SessionManager,
        neutral: &str,
    ) -> Result<Vec<String>, OrchestratorError> {
        if !self.config.summarize {
            self.report(Stage::Summarize, StagePhase::Skipped, "Summary disabled");
            return Ok(Vec::new());
        }

        let session = match sessions.acquire(CapabilityKind::Summarize).await {
            Ok(session) => session,
            Err(e) => {
                debug!(error = %e, "Summarizer not ready");
                self.report(Stage::Summarize, StagePhase::Skipped, "Summarizer unavailable");
                return Ok(Vec::new());
            }
        };

        self.report(Stage::Summarize, StagePhase::Started, "Summarizing key points...");
        let summary = match session.invoke(SessionRequest::text(neutral)).await {
            Ok(SessionOutput::Text(summary)) => summary,
            Ok(SessionOutput::Structured(value)) => value.to_string(),
            Err(source) => {
                self.report(Stage::Summarize, StagePhase::Failed, format!("Summary failed: {source}"));
                return Err(OrchestratorError::Stage {
                    stage: Stage::Summarize,
                    source,
                });
            }
        };

        let points = report::key_points(&summary);
        self.report(
            Stage::Summarize,
            StagePhase::Finished,
            format!("{} key points", points.len()),
        );
        Ok(points)
    }

    fn report(&self, stage: Stage, phase: StagePhase, message: impl Into<String>) {
        let status = StageStatus {
            stage,
            phase,
            message: message.into(),
        };
        debug!(%stage, ?phase, message = %status.message, "Stage status");
        if let Some(tx) = &self.status {
            // A closed receiver only means nobody is watching.
            let _ = tx.send(status);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
