//! AI capability protocol definitions.
//!
//! A capability is an opaque, externally hosted model (prompting, rewriting,
//! proofreading, summarizing). Providers hand out sessions; sessions are
//! invoked with text and destroyed explicitly when a pipeline run ends.

mod kind;
mod options;
mod request;
mod stream;
mod traits;

pub use kind::*;
pub use options::*;
pub use request::*;
pub use stream::*;
pub use traits::*;
