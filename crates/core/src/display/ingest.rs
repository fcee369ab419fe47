use async_trait::async_trait;
use tracing::{error, warn};

use crate::metrics::STREAM_EVENTS_DROPPED;
use crate::stream::{decode_recipe, StreamError, StreamHandler};

use super::DisplayHandle;

/// Stream handler that feeds decoded recipes into the display loop.
///
/// Malformed payloads are dropped here, before they can reach the ticket
/// factory, with a warning and a metric increment.
pub struct RecipeHandler {
    display: DisplayHandle,
}

impl RecipeHandler {
    pub fn new(display: DisplayHandle) -> Self {
        Self { display }
    }
}

#[async_trait]
impl StreamHandler for RecipeHandler {
    async fn on_message(&self, data: String) {
        match decode_recipe(&data) {
            Ok(recipe) => {
                if let Err(e) = self.display.recipe_received(recipe).await {
                    error!("Failed to queue recipe: {}", e);
                }
            }
            Err(e) => {
                STREAM_EVENTS_DROPPED.with_label_values(&[e.reason()]).inc();
                warn!(payload = %data, "Dropping malformed stream event: {}", e);
            }
        }
    }

    async fn on_error(&self, error: StreamError) {
        error!("Recipe stream terminated: {}", error);
    }
}
