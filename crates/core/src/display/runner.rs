use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::config::DisplayConfig;
use crate::metrics::DISPLAY_COMMANDS;
use crate::order::{OrderTicket, Transition};

use super::{ActionOutcome, BoardSnapshot, DisplayCommand, DisplayHandle, KitchenDisplay};

/// A change applied by the display loop.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayUpdate {
    OrderCreated { ticket: OrderTicket },
    StatusChanged {
        ticket: OrderTicket,
        transition: Transition,
    },
    SelectionChanged { ticket_id: Option<String> },
}

/// Callback invoked after every applied change.
pub type UpdateCallback = Arc<dyn Fn(&DisplayUpdate) + Send + Sync>;

/// Background task that owns the display state and applies commands in order.
pub struct DisplayLoop {
    rx: mpsc::Receiver<DisplayCommand>,
    /// Used by deselect timers; does not keep the loop alive.
    self_tx: mpsc::WeakSender<DisplayCommand>,
    board_tx: watch::Sender<Arc<BoardSnapshot>>,
    state: KitchenDisplay,
    deselect_delay: Duration,
    on_update: Option<UpdateCallback>,
}

/// Create a complete display system
///
/// Returns:
/// - `DisplayHandle` - for sending commands and reading snapshots (clone to share)
/// - `DisplayLoop` - spawn this as a background task with `tokio::spawn(display.run())`
pub fn create_display_system(config: &DisplayConfig) -> (DisplayHandle, DisplayLoop) {
    let (tx, rx) = mpsc::channel(config.command_buffer.max(1));
    let (board_tx, board_rx) = watch::channel(Arc::new(BoardSnapshot::default()));

    let display = DisplayLoop {
        rx,
        self_tx: tx.downgrade(),
        board_tx,
        state: KitchenDisplay::new(),
        deselect_delay: Duration::from_millis(config.deselect_delay_ms),
        on_update: None,
    };

    (DisplayHandle::new(tx, board_rx), display)
}

impl DisplayLoop {
    /// Set a callback for applied changes (e.g., to push WebSocket updates).
    pub fn with_update_callback(mut self, callback: UpdateCallback) -> Self {
        self.on_update = Some(callback);
        self
    }

    /// Run the loop, consuming commands until every handle is dropped.
    pub async fn run(mut self) {
        info!("Display loop started");

        while let Some(command) = self.rx.recv().await {
            DISPLAY_COMMANDS.with_label_values(&[command.name()]).inc();
            self.handle(command);
        }

        info!(
            "Display loop shutting down ({} orders this session)",
            self.state.store().len()
        );
    }

    fn handle(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::RecipeReceived(recipe) => {
                let ticket = self.state.receive_recipe(recipe, Utc::now()).clone();
                info!(
                    order_number = ticket.order_number,
                    meal = %ticket.recipe.meal,
                    "New order received"
                );
                self.publish();
                self.notify(DisplayUpdate::OrderCreated { ticket });
            }

            DisplayCommand::Apply {
                ticket_id,
                action,
                reply,
            } => {
                let result = self.state.apply(&ticket_id, action);
                let outcome = match result {
                    Ok((ticket, transition)) => {
                        if self.state.completes_selection(&ticket_id, &transition) {
                            self.schedule_deselect(ticket_id.clone());
                        }
                        if transition.changed() {
                            info!(
                                order_number = ticket.order_number,
                                from = %transition.from,
                                to = %transition.to,
                                "Order status changed"
                            );
                            self.publish();
                            self.notify(DisplayUpdate::StatusChanged {
                                ticket: ticket.clone(),
                                transition,
                            });
                        } else {
                            debug!(
                                order_number = ticket.order_number,
                                action = action.as_str(),
                                "Action left status unchanged"
                            );
                        }
                        Ok(ActionOutcome { ticket, transition })
                    }
                    Err(e) => {
                        debug!("Action {} rejected: {}", action.as_str(), e);
                        Err(e)
                    }
                };
                // Caller may have gone away
                let _ = reply.send(outcome);
            }

            DisplayCommand::Select { ticket_id } => {
                if self.state.select(ticket_id.clone()) {
                    self.publish();
                    self.notify(DisplayUpdate::SelectionChanged {
                        ticket_id: Some(ticket_id),
                    });
                }
            }

            DisplayCommand::ClearSelection => {
                if self.state.clear_selection() {
                    self.publish();
                    self.notify(DisplayUpdate::SelectionChanged { ticket_id: None });
                }
            }

            DisplayCommand::ExpireSelection { ticket_id } => {
                if self.state.expire_selection(&ticket_id) {
                    debug!("Deselected completed order {}", ticket_id);
                    self.publish();
                    self.notify(DisplayUpdate::SelectionChanged { ticket_id: None });
                }
            }

            DisplayCommand::Snapshot { reply } => {
                let _ = reply.send(Arc::clone(&self.board_tx.borrow()));
            }
        }
    }

    fn publish(&self) {
        self.board_tx.send_replace(Arc::new(self.state.snapshot()));
    }

    fn notify(&self, update: DisplayUpdate) {
        if let Some(callback) = &self.on_update {
            callback(&update);
        }
    }

    fn schedule_deselect(&self, ticket_id: String) {
        let tx = self.self_tx.clone();
        let delay = self.deselect_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(DisplayCommand::ExpireSelection { ticket_id }).await;
            }
        });
    }
}
