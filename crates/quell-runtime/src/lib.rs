//! # Quell Runtime
//!
//! Everything that sits between a user-facing trigger and the content-side
//! pipeline:
//!
//! - [`ToggleCoordinator`] - the on/off state machine behind the toggle button
//! - [`ToggleStateStore`] - the persisted `isQuellActive` flag
//! - [`PipelineOrchestrator`] - selection and full-article pipelines
//! - [`PromptConsole`] - the test-prompt input

pub mod coordinator;
pub mod error;
pub mod file_state_store;
pub mod orchestrator;
pub mod prompt;
pub mod state_store;

pub use coordinator::{TogglePhase, ToggleCoordinator, UiResponse};
pub use error::{OrchestratorError, StateStoreError};
pub use file_state_store::FileToggleStateStore;
pub use orchestrator::{
    BiasAssessment, BiasOutcome, PipelineMode, PipelineOrchestrator, QuellReport, Stage,
    StagePhase, StageStatus,
};
pub use prompt::PromptConsole;
pub use state_store::{install, MemoryToggleStateStore, PersistedToggleState, ToggleStateStore};
