//! Inbound recipe stream (server-sent events).

mod decoder;
mod payload;
mod sse;
mod traits;

pub use decoder::{SseDecoder, SseEvent};
pub use payload::{decode_recipe, PayloadError};
pub use sse::SseRecipeStream;
pub use traits::{RecipeStream, StreamError, StreamHandler, Subscription};
