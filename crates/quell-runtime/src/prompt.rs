//! Test-prompt console.

use std::sync::Arc;

use futures::StreamExt;
use tracing::debug;

use quell_protocols::capability::PromptOptions;
use quell_protocols::{
    collect_stream, CapabilityError, CapabilityKind, CapabilityProvider, SessionConfig,
    SessionOutput, SessionRequest,
};

/// Sends free-form text to a fresh prompt session.
pub struct PromptConsole {
    provider: Arc<dyn CapabilityProvider>,
    options: PromptOptions,
}

impl PromptConsole {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self {
            provider,
            options: PromptOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    /// Prompt once and return the whole answer.
    pub async fn run(&self, text: &str, stream: bool) -> Result<String, CapabilityError> {
        self.run_with(text, stream, |_| {}).await
    }

    /// Prompt once, handing every streamed chunk to `on_chunk` as it arrives.
    ///
    /// Without streaming the whole answer is handed over as one chunk. The
    /// session is destroyed before returning.
    pub async fn run_with<F>(
        &self,
        text: &str,
        stream: bool,
        mut on_chunk: F,
    ) -> Result<String, CapabilityError>
    where
        F: FnMut(&str) + Send,
    {
        if !self
            .provider
            .availability(CapabilityKind::Prompt)
            .await
            .is_usable()
        {
            return Err(CapabilityError::Unavailable(CapabilityKind::Prompt));
        }

        let session = self
            .provider
            .create_session(SessionConfig::Prompt(self.options.clone()))
            .await?;
        let request = SessionRequest::text(text);

        let result = if stream {
            match session.invoke_stream(request).await {
                Ok(chunks) => {
                    collect_stream(chunks.inspect(|chunk| {
                        if let Ok(chunk) = chunk {
                            on_chunk(chunk);
                        }
                    }))
                    .await
                }
                Err(e) => Err(e),
            }
        } else {
            session.invoke(request).await.map(|output| {
                let answer = match output {
                    SessionOutput::Text(text) => text,
                    SessionOutput::Structured(value) => value.to_string(),
                };
                on_chunk(&answer);
                answer
            })
        };

        session.destroy().await;
        debug!(stream, ok = result.is_ok(), "Prompt session finished");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use quell_protocols::{Availability, CapabilitySession, OutputStream};

    struct EchoProvider {
        available: bool,
        destroyed: Arc<AtomicBool>,
    }

    struct EchoSession {
        destroyed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl CapabilityProvider for EchoProvider {
        fn id(&self) -> &str {
            "echo"
        }

        async fn availability(&self, _kind: CapabilityKind) -> Availability {
            if self.available {
                Availability::Available
            } else {
                Availability::Unavailable
            }
        }

        async fn create_session(
            &self,
            _config: SessionConfig,
        ) -> Result<Arc<dyn CapabilitySession>, CapabilityError> {
            Ok(Arc::new(EchoSession {
                destroyed: Arc::clone(&self.destroyed),
            }))
        }
    }

    #[async_trait]
    impl CapabilitySession for EchoSession {
        fn kind(&self) -> CapabilityKind {
            CapabilityKind::Prompt
        }

        async fn invoke(&self, request: SessionRequest) -> Result<SessionOutput, CapabilityError> {
            Ok(SessionOutput::Text(format!("echo: {}", request.input.to_text())))
        }

        async fn invoke_stream(&self, request: SessionRequest) -> Result<OutputStream, CapabilityError> {
            let words: Vec<Result<String, CapabilityError>> = request
                .input
                .to_text()
                .split_inclusive(' ')
                .map(|w| match w.trim() {
                    "FAIL" => Err(CapabilityError::StreamError("connection reset".to_string())),
                    _ => Ok(w.to_string()),
                })
                .collect();
            Ok(Box::pin(futures::stream::iter(words)))
        }

        async fn destroy(&self) {
            self.destroyed.store(true, Ordering::SeqCst);
        }

        fn is_destroyed(&self) -> bool {
            self.destroyed.load(Ordering::SeqCst)
        }
    }

    fn console(available: bool) -> (PromptConsole, Arc<AtomicBool>) {
        let destroyed = Arc::new(AtomicBool::new(false));
        let provider = Arc::new(EchoProvider {
            available,
            destroyed: destroyed.clone(),
        });
        (PromptConsole::new(provider), destroyed)
    }

    #[tokio::test]
    async fn test_run_returns_answer_and_destroys() {
        let (console, destroyed) = console(true);
        let answer = console.run("hello there", false).await.unwrap();
        assert_eq!(answer, "echo: hello there");
        assert!(destroyed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_stream_concatenates_chunks() {
        let (console, _) = console(true);
        let mut chunks = Vec::new();
        let answer = console
            .run_with("one two three", true, |chunk| chunks.push(chunk.to_string()))
            .await
            .unwrap();
        assert_eq!(answer, "one two three");
        assert_eq!(chunks, vec!["one ", "two ", "three"]);
    }

    #[tokio::test]
    async fn test_stream_failure_stops_chunks_and_destroys() {
        let (console, destroyed) = console(true);
        let mut chunks = Vec::new();
        let err = console
            .run_with("one two FAIL three", true, |chunk| chunks.push(chunk.to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::StreamError(_)));
        assert_eq!(chunks, vec!["one ", "two "]);
        assert!(destroyed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unavailable_prompt() {
        let (console, destroyed) = console(false);
        let err = console.run("hi", true).await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(!destroyed.load(Ordering::SeqCst));
    }
}
