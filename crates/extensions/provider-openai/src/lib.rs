//! OpenAI-compatible capability provider for quell.
//!
//! Every capability kind is served by the chat-completions endpoint with a
//! kind-specific system instruction.

mod api;
mod converter;
mod provider;
mod session;
mod sse;

pub use provider::{OpenAIProvider, DEFAULT_API_URL, DEFAULT_MODEL};
pub use session::OpenAISession;
