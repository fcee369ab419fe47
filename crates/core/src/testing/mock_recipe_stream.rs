//! Mock recipe stream for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex, RwLock};

use crate::order::Recipe;
use crate::stream::{RecipeStream, StreamError, StreamHandler, Subscription};

use super::fixtures;

/// Mock implementation of the RecipeStream trait.
///
/// Events are delivered to the subscribed handler only when the test pushes
/// them. Closing the subscription or calling [`MockRecipeStream::fail`]
/// detaches the handler.
#[derive(Default)]
pub struct MockRecipeStream {
    handler: Arc<RwLock<Option<Arc<dyn StreamHandler>>>>,
    /// Ends the current subscription task when the stream fails.
    failed_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl std::fmt::Debug for MockRecipeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRecipeStream")
            .field("handler", &"<handler>")
            .finish()
    }
}

impl MockRecipeStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a subscription is active.
    pub async fn is_subscribed(&self) -> bool {
        self.handler.read().await.is_some()
    }

    /// Deliver a raw event payload. Returns false if nobody is subscribed.
    pub async fn push(&self, data: impl Into<String>) -> bool {
        let handler = self.handler.read().await.clone();
        match handler {
            Some(handler) => {
                handler.on_message(data.into()).await;
                true
            }
            None => false,
        }
    }

    /// Deliver a well-formed payload for `recipe`.
    pub async fn push_recipe(&self, recipe: &Recipe) -> bool {
        self.push(fixtures::payload(recipe)).await
    }

    /// Fail the stream: report `error` and end the subscription.
    pub async fn fail(&self, error: StreamError) {
        let handler = self.handler.write().await.take();
        if let Some(handler) = handler {
            handler.on_error(error).await;
        }
        if let Some(tx) = self.failed_tx.lock().await.take() {
            let _ = tx.send(());
        }
    }
}

#[async_trait]
impl RecipeStream for MockRecipeStream {
    async fn subscribe(&self, handler: Arc<dyn StreamHandler>) -> Subscription {
        *self.handler.write().await = Some(handler);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (failed_tx, failed_rx) = oneshot::channel::<()>();
        *self.failed_tx.lock().await = Some(failed_tx);

        let slot = Arc::clone(&self.handler);
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = shutdown_rx => {
                    slot.write().await.take();
                }
                // Handler already detached by fail()
                _ = failed_rx => {}
            }
        });
        Subscription::new(shutdown_tx, task)
    }
}
