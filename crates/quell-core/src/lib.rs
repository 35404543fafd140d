//! # Quell Core
//!
//! The content-side pipeline: everything that touches the page.
//!
//! - [`Document`] - arena of text-bearing blocks addressed by [`UnitId`]
//! - [`TextBlockSelector`] - picks the blocks worth rewriting
//! - [`OriginalTextLedger`] - remembers original text so every change can be reverted
//! - [`SessionManager`] - lazily creates and tears down capability sessions
//! - [`BatchScheduler`] - rewrites blocks in bounded concurrent batches
//! - [`ContentPipeline`] - owns all of the above and answers full-quell requests

pub mod document;
pub mod error;
pub mod extract;
pub mod handle;
pub mod ledger;
pub mod pipeline;
pub mod rewriter;
pub mod scheduler;
pub mod selector;
pub mod session;

#[cfg(test)]
mod test_support;

pub use document::{Document, HoverState, HoverSwap, Marker, SelectorRules, TextUnit, UnitId};
pub use error::{ChannelError, LedgerError, QuellError};
pub use extract::{Article, ArticleExtractor, HtmlArticleExtractor};
pub use handle::{ContentChannel, PipelineCommand, PipelineHandle};
pub use ledger::OriginalTextLedger;
pub use pipeline::ContentPipeline;
pub use rewriter::{SessionRewriter, UnitRewriter, NEUTRALIZE_INSTRUCTION};
pub use scheduler::{BatchOutcome, BatchReport, BatchScheduler};
pub use selector::TextBlockSelector;
pub use session::{SessionManager, SessionState};
