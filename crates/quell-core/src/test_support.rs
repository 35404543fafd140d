//! Scripted capability provider shared by unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use quell_protocols::{
    Availability, CapabilityError, CapabilityKind, CapabilityProvider, CapabilitySession,
    SessionConfig, SessionOutput, SessionRequest,
};

pub type RewriteFn = Arc<dyn Fn(&str) -> Result<String, CapabilityError> + Send + Sync>;
pub type ProofreadFn = Arc<dyn Fn(&str) -> Result<SessionOutput, CapabilityError> + Send + Sync>;

/// Provider whose sessions answer from closures.
pub struct ScriptedProvider {
    pub unavailable: HashSet<CapabilityKind>,
    pub failing: HashSet<CapabilityKind>,
    pub rewrite: RewriteFn,
    pub proofread: ProofreadFn,
    pub latency: Option<Duration>,
    pub created: Mutex<Vec<CapabilityKind>>,
    pub destroyed: Arc<AtomicUsize>,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            unavailable: HashSet::new(),
            failing: HashSet::new(),
            rewrite: Arc::new(|text| Ok(text.replace("very ", ""))),
            proofread: Arc::new(|text| Ok(SessionOutput::Text(text.to_string()))),
            latency: None,
            created: Mutex::new(Vec::new()),
            destroyed: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_rewrite(
        mut self,
        f: impl Fn(&str) -> Result<String, CapabilityError> + Send + Sync + 'static,
    ) -> Self {
        self.rewrite = Arc::new(f);
        self
    }

    pub fn with_proofread(
        mut self,
        f: impl Fn(&str) -> Result<SessionOutput, CapabilityError> + Send + Sync + 'static,
    ) -> Self {
        self.proofread = Arc::new(f);
        self
    }

    pub fn unavailable(mut self, kind: CapabilityKind) -> Self {
        self.unavailable.insert(kind);
        self
    }

    pub fn failing(mut self, kind: CapabilityKind) -> Self {
        self.failing.insert(kind);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn created(&self) -> Vec<CapabilityKind> {
        self.created.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilityProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn availability(&self, kind: CapabilityKind) -> Availability {
        if self.unavailable.contains(&kind) {
            Availability::Unavailable
        } else {
            Availability::Available
        }
    }

    async fn create_session(
        &self,
        config: SessionConfig,
    ) -> Result<Arc<dyn CapabilitySession>, CapabilityError> {
        let kind = config.kind();
        if self.failing.contains(&kind) {
            return Err(CapabilityError::CreationFailed {
                kind,
                message: "model download interrupted".to_string(),
            });
        }
        self.created.lock().unwrap().push(kind);
        Ok(Arc::new(ScriptedSession {
            kind,
            rewrite: Arc::clone(&self.rewrite),
            proofread: Arc::clone(&self.proofread),
            latency: self.latency,
            destroyed: AtomicBool::new(false),
            destroy_count: Arc::clone(&self.destroyed),
            in_flight: Arc::clone(&self.in_flight),
            max_in_flight: Arc::clone(&self.max_in_flight),
        }))
    }
}

struct ScriptedSession {
    kind: CapabilityKind,
    rewrite: RewriteFn,
    proofread: ProofreadFn,
    latency: Option<Duration>,
    destroyed: AtomicBool,
    destroy_count: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[async_trait]
impl CapabilitySession for ScriptedSession {
    fn kind(&self) -> CapabilityKind {
        self.kind
    }

    async fn invoke(&self, request: SessionRequest) -> Result<SessionOutput, CapabilityError> {
        if self.is_destroyed() {
            return Err(CapabilityError::SessionDestroyed(self.kind));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let text = request.input.to_text();
        match self.kind {
            CapabilityKind::Rewrite => (self.rewrite)(&text).map(SessionOutput::Text),
            CapabilityKind::Proofread => (self.proofread)(&text),
            _ => Ok(SessionOutput::Text(text)),
        }
    }

    async fn destroy(&self) {
        if !self.destroyed.swap(true, Ordering::SeqCst) {
            self.destroy_count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}
