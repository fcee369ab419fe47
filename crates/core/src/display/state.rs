//! Display state: the order store plus the current selection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::order::{
    create_ticket, OrderBoard, OrderError, OrderStore, OrderTicket, Recipe, StatusAction,
    Transition,
};

/// Immutable view of the display published after every change.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BoardSnapshot {
    pub board: OrderBoard,
    /// The selected ticket, if the selection resolves to one.
    pub selected: Option<OrderTicket>,
}

/// Order store and selection, mutated synchronously.
#[derive(Debug, Default)]
pub struct KitchenDisplay {
    store: OrderStore,
    selected: Option<String>,
}

impl KitchenDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pending ticket for a decoded recipe and add it to the store.
    pub fn receive_recipe(&mut self, recipe: Recipe, now: DateTime<Utc>) -> &OrderTicket {
        let ticket = create_ticket(self.store.list(), recipe, now);
        self.store.append(ticket);
        // Just appended
        &self.store.list()[self.store.len() - 1]
    }

    /// Apply a staff action. Returns the updated ticket and the transition.
    pub fn apply(
        &mut self,
        ticket_id: &str,
        action: StatusAction,
    ) -> Result<(OrderTicket, Transition), OrderError> {
        let transition = self.store.apply_action(ticket_id, action)?;
        let ticket = self
            .store
            .get(ticket_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(ticket_id.to_string()))?;
        Ok((ticket, transition))
    }

    /// Returns true if `transition` just completed the selected ticket.
    pub fn completes_selection(&self, ticket_id: &str, transition: &Transition) -> bool {
        transition.completed() && self.selected_id() == Some(ticket_id)
    }

    /// Select a ticket. Any id is accepted; one that does not resolve reads
    /// as no selection. Returns true if the selection changed.
    pub fn select(&mut self, ticket_id: impl Into<String>) -> bool {
        let ticket_id = ticket_id.into();
        if self.selected.as_deref() == Some(ticket_id.as_str()) {
            return false;
        }
        self.selected = Some(ticket_id);
        true
    }

    /// Returns true if there was a selection to clear.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Clear the selection only if it is still `ticket_id`.
    pub fn expire_selection(&mut self, ticket_id: &str) -> bool {
        if self.selected_id() == Some(ticket_id) {
            self.selected = None;
            true
        } else {
            false
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected ticket, or `None` if nothing is selected or the id
    /// does not resolve.
    pub fn selected_ticket(&self) -> Option<&OrderTicket> {
        self.selected.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: OrderBoard::from_store(&self.store),
            selected: self.selected_ticket().cloned(),
        }
    }
}
