//! # Quell Protocols
//!
//! Core protocol definitions for the quell workspace.
//! Contains only interface definitions and wire types - no implementations.
//!
//! ## Core Traits
//!
//! - [`CapabilityProvider`] - Creates sessions for the external AI capabilities
//! - [`CapabilitySession`] - A live handle to one capability (prompt, rewrite,
//!   proofread, summarize)
//!
//! ## Messages
//!
//! [`message`] holds the request/response shapes exchanged between the UI
//! surface, the toggle coordinator and the content-side pipeline.

pub mod capability;
pub mod error;
pub mod message;

pub use capability::{
    collect_stream, Availability, CapabilityKind, CapabilityProvider, CapabilitySession,
    OutputStream, SessionConfig, SessionInput, SessionOutput, SessionRequest,
};
pub use error::CapabilityError;
pub use message::{ContentRequest, QuellResponse, ToggleStateResponse, UiRequest};
