//! Offline capability provider for quell.
//!
//! Rewrites by swapping sensational words from a table, scores bias by
//! counting them and summarizes by keeping lead sentences. Output is fully
//! deterministic, which makes it usable without network access.

mod lexicon;
mod provider;
mod summary;

pub use lexicon::{Lexicon, LexiconError};
pub use provider::{LexiconProvider, LexiconSession};
pub use summary::lead_sentences;
