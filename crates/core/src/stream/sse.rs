//! SSE stream client backed by reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::StreamConfig;
use crate::metrics::{STREAM_ERRORS, STREAM_EVENTS_DROPPED, STREAM_EVENTS_RECEIVED};

use super::{RecipeStream, SseDecoder, StreamError, StreamHandler, Subscription};

/// Recipe stream read from a server-sent-event endpoint.
///
/// One connection per subscription. A failed or closed connection is
/// reported to the handler and not retried.
pub struct SseRecipeStream {
    client: Client,
    url: String,
}

impl SseRecipeStream {
    /// Create a new stream client for the configured endpoint.
    pub fn new(config: &StreamConfig) -> Result<Self, StreamError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| StreamError::Connect(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Endpoint this stream reads from.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn run(
        client: Client,
        url: String,
        handler: Arc<dyn StreamHandler>,
        shutdown_rx: oneshot::Receiver<()>,
    ) {
        tokio::select! {
            _ = shutdown_rx => {
                info!("Recipe stream subscription closed");
            }
            result = Self::read(&client, &url, handler.as_ref()) => {
                if let Err(e) = result {
                    STREAM_ERRORS.with_label_values(&[e.kind()]).inc();
                    handler.on_error(e).await;
                }
            }
        }
    }

    /// Read events until the connection fails. Only returns on error.
    async fn read(
        client: &Client,
        url: &str,
        handler: &dyn StreamHandler,
    ) -> Result<(), StreamError> {
        let response = client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| StreamError::Connect(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status(status.as_u16()));
        }

        info!("Connected to recipe stream at {}", url);

        let mut body = response.bytes_stream();
        let mut decoder = SseDecoder::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| StreamError::Transport(e.to_string()))?;
            for event in decoder.feed(&chunk) {
                debug!(event = ?event.event, id = ?event.id, "Stream event received");
                STREAM_EVENTS_RECEIVED.inc();
                if !event.is_message() {
                    STREAM_EVENTS_DROPPED
                        .with_label_values(&["unhandled_event"])
                        .inc();
                    continue;
                }
                handler.on_message(event.data).await;
            }
        }

        Err(StreamError::Disconnected)
    }
}

#[async_trait]
impl RecipeStream for SseRecipeStream {
    async fn subscribe(&self, handler: Arc<dyn StreamHandler>) -> Subscription {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(Self::run(
            self.client.clone(),
            self.url.clone(),
            handler,
            shutdown_rx,
        ));
        Subscription::new(shutdown_tx, task)
    }
}
