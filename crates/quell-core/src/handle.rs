//! Request/response channel to a running [`ContentPipeline`](crate::ContentPipeline).
//!
//! Every request carries its own `oneshot` reply sender, so each request
//! gets at most one response and a dropped pipeline surfaces as an error
//! instead of a hang.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use quell_protocols::{ContentRequest, QuellResponse};

use crate::error::ChannelError;

/// One queued request for the content pipeline.
#[derive(Debug)]
pub struct PipelineCommand {
    pub request: ContentRequest,
    pub reply: oneshot::Sender<QuellResponse>,
}

/// The coordinator's view of the content-side pipeline.
#[async_trait]
pub trait ContentChannel: Send + Sync {
    async fn run_full_quell(&self, is_active: bool) -> Result<QuellResponse, ChannelError>;
}

/// Cloneable sender side of a spawned content pipeline.
#[derive(Debug, Clone)]
pub struct PipelineHandle {
    tx: mpsc::Sender<PipelineCommand>,
}

impl PipelineHandle {
    pub fn new(tx: mpsc::Sender<PipelineCommand>) -> Self {
        Self { tx }
    }

    /// Send a request and wait for its single response.
    pub async fn request(&self, request: ContentRequest) -> Result<QuellResponse, ChannelError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(PipelineCommand { request, reply })
            .await
            .map_err(|_| ChannelError::Closed)?;
        response.await.map_err(|_| ChannelError::NoResponse)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl ContentChannel for PipelineHandle {
    async fn run_full_quell(&self, is_active: bool) -> Result<QuellResponse, ChannelError> {
        self.request(ContentRequest::RunFullQuell { is_active }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = PipelineHandle::new(tx);
        assert!(handle.is_closed());
        assert!(matches!(
            handle.run_full_quell(true).await,
            Err(ChannelError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_no_response() {
        let (tx, mut rx) = mpsc::channel::<PipelineCommand>(1);
        tokio::spawn(async move {
            if let Some(command) = rx.recv().await {
                drop(command.reply);
            }
        });
        let handle = PipelineHandle::new(tx);
        assert!(matches!(
            handle.run_full_quell(false).await,
            Err(ChannelError::NoResponse)
        ));
    }

    #[tokio::test]
    async fn test_reply_is_delivered() {
        let (tx, mut rx) = mpsc::channel::<PipelineCommand>(1);
        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                let ContentRequest::RunFullQuell { is_active } = command.request;
                let _ = command.reply.send(QuellResponse::success(usize::from(is_active)));
            }
        });
        let handle = PipelineHandle::new(tx);
        let response = handle.run_full_quell(true).await.unwrap();
        assert_eq!(response, QuellResponse::success(1));
    }
}
