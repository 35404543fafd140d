//! Error types for the quell protocol layer.

mod capability;

pub use capability::*;
