//! The kitchen display: one event-processing path over the order store.
//!
//! Stream messages and staff actions are both turned into [`DisplayCommand`]s
//! and applied one at a time by the [`DisplayLoop`], which is the only writer
//! of the store. Readers get immutable [`BoardSnapshot`]s.

mod handle;
mod ingest;
mod runner;
mod state;

pub use handle::{ActionOutcome, DisplayCommand, DisplayError, DisplayHandle};
pub use ingest::RecipeHandler;
pub use runner::{create_display_system, DisplayLoop, DisplayUpdate, UpdateCallback};
pub use state::{BoardSnapshot, KitchenDisplay};
