//! Stream subscription interface.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

/// Error type for stream connections.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("Failed to connect to stream: {0}")]
    Connect(String),

    #[error("Stream endpoint returned status {0}")]
    Status(u16),

    #[error("Stream transport error: {0}")]
    Transport(String),

    #[error("Stream closed by server")]
    Disconnected,
}

impl StreamError {
    /// Short kind label (for metrics).
    pub fn kind(&self) -> &'static str {
        match self {
            StreamError::Connect(_) => "connect",
            StreamError::Status(_) => "status",
            StreamError::Transport(_) => "transport",
            StreamError::Disconnected => "disconnected",
        }
    }
}

/// Receiver side of a subscription.
#[async_trait]
pub trait StreamHandler: Send + Sync {
    /// Called with the `data` of each event, in arrival order.
    async fn on_message(&self, data: String);

    /// Called once when the subscription fails. No further calls follow.
    async fn on_error(&self, error: StreamError);
}

/// A source of recipe events.
#[async_trait]
pub trait RecipeStream: Send + Sync {
    /// Open the stream and deliver events to `handler` until the returned
    /// subscription is closed or the stream fails.
    async fn subscribe(&self, handler: Arc<dyn StreamHandler>) -> Subscription;
}

/// A live subscription. Closing it (or dropping it) stops delivery.
pub struct Subscription {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Wrap a reader task that stops when `shutdown_tx` fires or is dropped.
    pub fn new(shutdown_tx: oneshot::Sender<()>, task: JoinHandle<()>) -> Self {
        Self {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Returns true if the reader task has ended (stream failed or closed).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Signal the reader to stop and wait for it.
    pub async fn close(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!("Stream reader ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
