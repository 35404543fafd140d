use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::StateStoreError;
use crate::state_store::MemoryToggleStateStore;

/// Channel that answers from a fixed script.
enum Script {
    Respond(QuellResponse),
    Fail(fn() -> ChannelError),
    Hang,
    WaitFor(Arc<Notify>, QuellResponse),
}

struct ScriptedChannel {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedChannel {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ContentChannel for ScriptedChannel {
    async fn run_full_quell(&self, _is_active: bool) -> Result<QuellResponse, ChannelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Respond(response) => Ok(response.clone()),
            Script::Fail(err) => Err(err()),
            Script::Hang => std::future::pending().await,
            Script::WaitFor(notify, response) => {
                notify.notified().await;
                Ok(response.clone())
            }
        }
    }
}

/// Store whose writes always fail.
struct ReadOnlyStore;

#[async_trait]
impl ToggleStateStore for ReadOnlyStore {
    async fn load(&self) -> Result<bool, StateStoreError> {
        Ok(false)
    }

    async fn save(&self, _active: bool) -> Result<(), StateStoreError> {
        Err(StateStoreError::Io(std::io::Error::other("read-only")))
    }

    async fn reset(&self) -> Result<(), StateStoreError> {
        Ok(())
    }
}

fn coordinator(
    store: Arc<MemoryToggleStateStore>,
    channel: Arc<ScriptedChannel>,
) -> ToggleCoordinator {
    ToggleCoordinator::new(store, channel, Duration::from_secs(120))
}

#[tokio::test]
async fn test_successful_toggle_persists_and_reports_changes() {
    let store = Arc::new(MemoryToggleStateStore::new());
    let channel = ScriptedChannel::new(Script::Respond(QuellResponse::success(4)));
    let coordinator = coordinator(store.clone(), channel.clone());

    let response = coordinator.toggle(true).await;

    assert_eq!(response, QuellResponse::success(4));
    assert!(store.load().await.unwrap());
    assert_eq!(coordinator.phase(), TogglePhase::Active);
    assert_eq!(
        coordinator.request_toggle_state().await,
        ToggleStateResponse { active: true }
    );
}

#[tokio::test]
async fn test_pipeline_failure_restores_flag() {
    let store = Arc::new(MemoryToggleStateStore::with_state(false));
    let channel = ScriptedChannel::new(Script::Respond(QuellResponse::failure(
        "Capability unavailable: rewrite",
    )));
    let coordinator = coordinator(store.clone(), channel);

    let response = coordinator.toggle(true).await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Capability unavailable: rewrite"));
    assert!(!store.load().await.unwrap());
    assert_eq!(coordinator.phase(), TogglePhase::Inactive);
}

#[tokio::test]
async fn test_closed_channel_is_communication_failure() {
    let store = Arc::new(MemoryToggleStateStore::with_state(true));
    let channel = ScriptedChannel::new(Script::Fail(|| ChannelError::Closed));
    let coordinator = coordinator(store.clone(), channel);

    let response = coordinator.toggle(false).await;

    assert!(!response.success);
    assert!(response.error.unwrap().contains("Could not communicate"));
    // Restored to the value before the call, not to the requested one.
    assert!(store.load().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_lost_response_times_out() {
    let store = Arc::new(MemoryToggleStateStore::new());
    let channel = ScriptedChannel::new(Script::Hang);
    let coordinator = ToggleCoordinator::new(store.clone(), channel, Duration::from_secs(5));

    let response = coordinator.toggle(true).await;

    assert!(!response.success);
    assert!(response.error.unwrap().contains("after 5 seconds"));
    assert!(!store.load().await.unwrap());
    assert_eq!(coordinator.phase(), TogglePhase::Inactive);
}

#[tokio::test]
async fn test_toggle_during_transition_is_rejected() {
    let store = Arc::new(MemoryToggleStateStore::new());
    let release = Arc::new(Notify::new());
    let channel = ScriptedChannel::new(Script::WaitFor(
        release.clone(),
        QuellResponse::success(2),
    ));
    let coordinator = Arc::new(coordinator(store.clone(), channel.clone()));

    let activation = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.toggle(true).await }
    });
    while channel.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    assert_eq!(coordinator.phase(), TogglePhase::Activating);

    let rejected = coordinator.toggle(false).await;
    assert_eq!(rejected, QuellResponse::failure(TOGGLE_IN_PROGRESS));
    assert_eq!(channel.calls.load(Ordering::SeqCst), 1);

    release.notify_one();
    let response = activation.await.unwrap();
    assert_eq!(response, QuellResponse::success(2));
    assert_eq!(coordinator.phase(), TogglePhase::Active);
    assert!(store.load().await.unwrap());
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let channel = ScriptedChannel::new(Script::Respond(QuellResponse::success(1)));
    let coordinator =
        ToggleCoordinator::new(Arc::new(ReadOnlyStore), channel.clone(), Duration::from_secs(1));

    let response = coordinator.toggle(true).await;

    assert!(!response.success);
    assert_eq!(channel.calls.load(Ordering::SeqCst), 0);
    assert_eq!(coordinator.phase(), TogglePhase::Inactive);
}

#[tokio::test]
async fn test_handle_dispatches_ui_requests() {
    let store = Arc::new(MemoryToggleStateStore::new());
    let channel = ScriptedChannel::new(Script::Respond(QuellResponse::success(0)));
    let coordinator = coordinator(store, channel);

    let state = coordinator.handle(UiRequest::GetToggleState).await;
    assert_eq!(state, UiResponse::State(ToggleStateResponse { active: false }));

    let toggled = coordinator.handle(UiRequest::Toggle { new_state: true }).await;
    assert_eq!(
        serde_json::to_value(&toggled).unwrap(),
        serde_json::json!({"success": true, "changesMade": 0})
    );
}
