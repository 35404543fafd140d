//! Batch scheduler.
//!
//! Candidates are rewritten in consecutive chunks. Requests inside a chunk
//! run concurrently and are joined together; chunks run one after another
//! with a cooperative pause in between.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::document::{Document, UnitId};
use crate::ledger::OriginalTextLedger;
use crate::rewriter::UnitRewriter;

/// Result of one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub index: usize,
    pub size: usize,
    /// Units whose text changed.
    pub applied: usize,
    /// Units whose rewrite matched the original.
    pub unchanged: usize,
    /// Units whose rewrite failed and were skipped.
    pub failed: usize,
}

/// Aggregate result of a scheduler run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub batches: Vec<BatchOutcome>,
    /// Number of cooperative pauses taken between chunks.
    pub yields: usize,
}

impl BatchReport {
    /// Total number of units changed.
    pub fn applied(&self) -> usize {
        self.batches.iter().map(|b| b.applied).sum()
    }

    pub fn unchanged(&self) -> usize {
        self.batches.iter().map(|b| b.unchanged).sum()
    }

    pub fn failed(&self) -> usize {
        self.batches.iter().map(|b| b.failed).sum()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.iter().map(|b| b.size).collect()
    }
}

/// Drives rewrites in bounded concurrent chunks.
#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler {
    batch_size: usize,
    yield_interval: Duration,
}

impl BatchScheduler {
    /// `batch_size` is clamped to at least 1.
    pub fn new(batch_size: usize, yield_interval: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            yield_interval,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn yield_interval(&self) -> Duration {
        self.yield_interval
    }

    /// Rewrite `units` and apply every changed result through the ledger.
    ///
    /// A failure for one unit never aborts its chunk; it is logged and counted.
    pub async fn run_batches<R>(
        &self,
        units: &[UnitId],
        document: &mut Document,
        ledger: &mut OriginalTextLedger,
        rewriter: &R,
    ) -> BatchReport
    where
        R: UnitRewriter + ?Sized,
    {
        let mut report = BatchReport::default();
        let total = units.len().div_ceil(self.batch_size);

        for (index, chunk) in units.chunks(self.batch_size).enumerate() {
            let inputs: Vec<(UnitId, String)> = chunk
                .iter()
                .filter_map(|&id| document.get(id).map(|unit| (id, unit.text().trim().to_string())))
                .collect();

            let results = join_all(inputs.iter().map(|(_, text)| rewriter.rewrite(text))).await;

            let mut outcome = BatchOutcome {
                index,
                size: chunk.len(),
                failed: chunk.len() - inputs.len(),
                ..Default::default()
            };
            for ((unit, _), result) in inputs.iter().zip(results) {
                let rewritten = match result {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(%unit, error = %e, "Rewrite failed, leaving unit unchanged");
                        outcome.failed += 1;
                        continue;
                    }
                };
                match ledger.apply(document, *unit, &rewritten) {
                    Ok(true) => outcome.applied += 1,
                    Ok(false) => outcome.unchanged += 1,
                    Err(e) => {
                        warn!(%unit, error = %e, "Could not apply rewrite");
                        outcome.failed += 1;
                    }
                }
            }

            debug!(
                batch = index,
                size = outcome.size,
                applied = outcome.applied,
                failed = outcome.failed,
                "Batch settled"
            );
            report.batches.push(outcome);

            if index + 1 < total {
                report.yields += 1;
                if self.yield_interval.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::time::sleep(self.yield_interval).await;
                }
            }
        }

        report
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
