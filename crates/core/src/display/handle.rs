use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

use crate::order::{OrderError, OrderTicket, Recipe, StatusAction, Transition};

use super::BoardSnapshot;

/// Error type for display operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Display loop is not running")]
    Closed,
}

/// Result of a staff action.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActionOutcome {
    pub ticket: OrderTicket,
    pub transition: Transition,
}

/// A unit of work for the display loop.
#[derive(Debug)]
pub enum DisplayCommand {
    /// A decoded recipe arrived from the stream.
    RecipeReceived(Recipe),
    /// A staff action on one ticket.
    Apply {
        ticket_id: String,
        action: StatusAction,
        reply: oneshot::Sender<Result<ActionOutcome, OrderError>>,
    },
    Select {
        ticket_id: String,
    },
    ClearSelection,
    /// Deferred deselect after the selected ticket was completed.
    ExpireSelection {
        ticket_id: String,
    },
    /// Reply with the snapshot once every earlier command has been applied.
    Snapshot {
        reply: oneshot::Sender<Arc<BoardSnapshot>>,
    },
}

impl DisplayCommand {
    /// Command name (for metrics and logs).
    pub fn name(&self) -> &'static str {
        match self {
            DisplayCommand::RecipeReceived(_) => "recipe_received",
            DisplayCommand::Apply { .. } => "apply",
            DisplayCommand::Select { .. } => "select",
            DisplayCommand::ClearSelection => "clear_selection",
            DisplayCommand::ExpireSelection { .. } => "expire_selection",
            DisplayCommand::Snapshot { .. } => "snapshot",
        }
    }
}

/// Handle for sending commands to the display loop.
///
/// This is cheaply cloneable and can be shared across tasks. The loop
/// stops once every handle has been dropped.
#[derive(Clone)]
pub struct DisplayHandle {
    tx: mpsc::Sender<DisplayCommand>,
    board_rx: watch::Receiver<Arc<BoardSnapshot>>,
}

impl DisplayHandle {
    pub(crate) fn new(
        tx: mpsc::Sender<DisplayCommand>,
        board_rx: watch::Receiver<Arc<BoardSnapshot>>,
    ) -> Self {
        Self { tx, board_rx }
    }

    async fn send(&self, command: DisplayCommand) -> Result<(), DisplayError> {
        self.tx.send(command).await.map_err(|_| DisplayError::Closed)
    }

    /// Queue a decoded recipe for ticket creation.
    pub async fn recipe_received(&self, recipe: Recipe) -> Result<(), DisplayError> {
        self.send(DisplayCommand::RecipeReceived(recipe)).await
    }

    /// Apply a staff action and wait for the outcome.
    pub async fn apply(
        &self,
        ticket_id: impl Into<String>,
        action: StatusAction,
    ) -> Result<ActionOutcome, DisplayError> {
        let (reply, rx) = oneshot::channel();
        self.send(DisplayCommand::Apply {
            ticket_id: ticket_id.into(),
            action,
            reply,
        })
        .await?;
        let outcome = rx.await.map_err(|_| DisplayError::Closed)??;
        Ok(outcome)
    }

    pub async fn select(&self, ticket_id: impl Into<String>) -> Result<(), DisplayError> {
        self.send(DisplayCommand::Select {
            ticket_id: ticket_id.into(),
        })
        .await
    }

    pub async fn clear_selection(&self) -> Result<(), DisplayError> {
        self.send(DisplayCommand::ClearSelection).await
    }

    /// Snapshot after all previously sent commands have been applied.
    pub async fn snapshot(&self) -> Result<Arc<BoardSnapshot>, DisplayError> {
        let (reply, rx) = oneshot::channel();
        self.send(DisplayCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| DisplayError::Closed)
    }

    /// Latest published snapshot, without waiting for queued commands.
    pub fn current(&self) -> Arc<BoardSnapshot> {
        Arc::clone(&self.board_rx.borrow())
    }
}
